// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::f64::consts::E;
use std::f64::consts::LN_2;

use googletest::assert_that;
use googletest::prelude::near;
use kaps::error::ErrorKind;
use kaps::transform::Family;
use kaps::transform::Transform;
use kaps::transform::fit;

#[test]
fn test_closed_forms() {
    let (mu, sigma) = fit::fit_normal(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!((mu, sigma), (2.0, 1.0));

    assert_eq!(fit::fit_exponential(&[1.0, 2.0, 3.0]).unwrap(), 0.5);

    let (mu, sigma) = fit::fit_lognormal(&[1.0, E, E * E]).unwrap();
    assert_that!(mu, near(1.0, 1e-12));
    assert_that!(sigma, near(1.0, 1e-12));

    let (mu, s) = fit::fit_logistic(&[8.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
    assert_eq!(mu, 4.5);
    assert_that!(s, near(4.0 / (2.0 * 3.0f64.ln()), 1e-12));

    assert_eq!(fit::fit_weibull(&[2.0, 4.0]).unwrap(), (1.0, 3.0));
}

#[test]
fn test_hill_estimator() {
    let sample = [4.0, 1.0, 2.0];
    let (xm, alpha) = fit::fit_pareto(&sample, None).unwrap();
    assert_eq!(xm, 1.0);
    assert_that!(alpha, near(1.0 / LN_2, 1e-12));

    let (xm, alpha) = fit::fit_pareto(&sample, Some(2.0)).unwrap();
    assert_eq!(xm, 2.0);
    assert_that!(alpha, near(2.0 / LN_2, 1e-12));

    // invalid thresholds fall back to the sample minimum
    assert_eq!(fit::fit_pareto(&sample, Some(-1.0)).unwrap().0, 1.0);
    assert_eq!(fit::fit_pareto(&sample, Some(f64::NAN)).unwrap().0, 1.0);

    // non-positive values take no part
    let (xm, _) = fit::fit_pareto(&[-3.0, 0.0, 5.0, 10.0], None).unwrap();
    assert_eq!(xm, 5.0);
    assert_eq!(fit::fit_pareto(&[-3.0, 0.0], None).unwrap(), (1.0, 1.0));
}

#[test]
fn test_degenerate_samples_yield_usable_transforms() {
    let constant = [5.0; 16];
    let zeros = [0.0; 4];
    let negative = [-2.0, -1.0];
    for sample in [&constant[..], &zeros[..], &negative[..], &[42.0][..]] {
        for family in Family::ALL {
            let transform = Transform::fit(family, sample).unwrap();
            assert_eq!(transform.family(), family);
            for &x in sample {
                assert!(transform.evaluate(x).is_finite(), "{transform} at {x}");
            }
        }
    }
}

#[test]
fn test_fit_recovers_generating_family() {
    let sample: Vec<f64> = (1..=1000).map(|i| f64::from(i) / 10.0).collect();
    let transform = Transform::fit(Family::Exponential, &sample).unwrap();
    assert_that!(transform.params()[0], near(1.0 / 50.05, 1e-12));

    let transform = Transform::fit(Family::Normal, &sample).unwrap();
    assert_that!(transform.params()[0], near(50.05, 1e-9));

    assert_eq!(
        Transform::fit(Family::BoxCox, &sample).unwrap(),
        Transform::box_cox(0.0).unwrap()
    );
    assert_eq!(
        Transform::fit(Family::ZipfLog, &sample).unwrap(),
        Transform::zipf_log()
    );
}

#[test]
fn test_empty_sample() {
    for err in [
        fit::fit_normal(&[]).unwrap_err(),
        fit::fit_exponential(&[]).unwrap_err(),
        fit::fit_lognormal(&[]).unwrap_err(),
        fit::fit_pareto(&[], Some(1.0)).unwrap_err(),
        fit::fit_logistic(&[]).unwrap_err(),
        fit::fit_weibull(&[]).unwrap_err(),
        Transform::fit(Family::Uniform, &[]).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }
}

#[test]
fn test_resolve_complete_descriptor() {
    let transform = Transform::resolve(Family::Normal, &[1.0, 2.0], &[]).unwrap();
    assert_eq!(transform, Transform::normal(1.0, 2.0).unwrap());

    // extra parameters are ignored
    let transform = Transform::resolve(Family::BoxCox, &[0.5, 9.0], &[]).unwrap();
    assert_eq!(transform, Transform::box_cox(0.5).unwrap());

    let err = Transform::resolve(Family::Weibull, &[1.0, -3.0], &[1.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_resolve_partial_descriptor() {
    let sample = [1.0, 2.0, 3.0];
    let transform = Transform::resolve(Family::Normal, &[], &sample).unwrap();
    assert_eq!(transform, Transform::normal(2.0, 1.0).unwrap());

    let transform = Transform::resolve(Family::Normal, &[7.0], &sample).unwrap();
    assert_eq!(transform, Transform::normal(2.0, 1.0).unwrap());

    // a lone shape is kept and only the scale is estimated
    let transform = Transform::resolve(Family::Pareto, &[2.5], &sample).unwrap();
    assert_eq!(transform, Transform::pareto(1.0, 2.5).unwrap());
    let transform = Transform::resolve(Family::ZipfPareto, &[1.1], &sample).unwrap();
    assert_eq!(transform, Transform::zipf_pareto(1.0, 1.1).unwrap());

    let err = Transform::resolve(Family::Exponential, &[], &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
}

#[test]
fn test_samples_near_f64_max_stay_finite() {
    let sample = [1e308, 1.5e308, 1.7e308];
    let (mu, sigma) = fit::fit_normal(&sample).unwrap();
    assert_that!(mu, near(1.4e308, 1e296));
    assert!(sigma.is_finite() && sigma > 0.0, "sigma = {sigma}");

    let (mu, s) = fit::fit_logistic(&[-f64::MAX, -1.0, 1.0, f64::MAX]).unwrap();
    assert_eq!(mu, 0.0);
    assert!(s.is_finite() && s > 0.0, "s = {s}");

    for family in Family::ALL {
        let transform = Transform::fit(family, &sample).unwrap();
        assert!(transform.params().iter().all(|p| p.is_finite()), "{transform}");
    }
    let catalog = kaps::select::Catalog::fitted(&sample).unwrap();
    assert_eq!(catalog.len(), Family::ALL.len() - 1);
}

#[test]
fn test_non_finite_values_are_skipped() {
    let sample = [1.0, f64::NAN, 2.0, f64::INFINITY, 3.0];
    assert_eq!(fit::fit_normal(&sample).unwrap(), (2.0, 1.0));
    assert_eq!(fit::fit_exponential(&sample).unwrap(), 0.5);
    assert_eq!(fit::fit_logistic(&sample).unwrap().0, 2.0);

    for family in Family::ALL {
        assert!(Transform::fit(family, &[f64::NAN, f64::INFINITY]).is_ok());
    }
}
