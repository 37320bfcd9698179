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

use std::collections::HashSet;

use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::near;
use kaps::error::ErrorKind;
use kaps::transform::Family;
use kaps::transform::Transform;

fn all_families() -> Vec<Transform> {
    vec![
        Transform::uniform(),
        Transform::normal(10.0, 3.0).unwrap(),
        Transform::exponential(0.25).unwrap(),
        Transform::lognormal(1.0, 0.5).unwrap(),
        Transform::pareto(2.0, 1.5).unwrap(),
        Transform::weibull(1.5, 8.0).unwrap(),
        Transform::logistic(-4.0, 2.0).unwrap(),
        Transform::zipf_log(),
        Transform::zipf_pareto(1.0, 2.1).unwrap(),
        Transform::box_cox(-0.5).unwrap(),
        Transform::box_cox(0.0).unwrap(),
        Transform::box_cox(2.0).unwrap(),
    ]
}

#[test]
fn test_known_values() {
    assert_eq!(Transform::uniform().evaluate(-12.5), -12.5);
    assert_that!(Transform::normal(0.0, 1.0).unwrap().evaluate(0.0), near(0.5, 1e-15));
    assert_that!(
        Transform::normal(100.0, 10.0).unwrap().evaluate(110.0),
        near(0.841_344_746_068_543, 1e-12)
    );
    assert_that!(
        Transform::exponential(2.0).unwrap().evaluate(1.0),
        near(1.0 - (-2.0f64).exp(), 1e-15)
    );
    assert_that!(Transform::lognormal(0.0, 1.0).unwrap().evaluate(1.0), near(0.5, 1e-15));
    assert_that!(Transform::pareto(1.0, 2.0).unwrap().evaluate(2.0), near(0.75, 1e-15));
    assert_that!(
        Transform::weibull(2.0, 1.0).unwrap().evaluate(1.0),
        near(1.0 - (-1.0f64).exp(), 1e-15)
    );
    assert_that!(Transform::logistic(3.0, 1.0).unwrap().evaluate(3.0), near(0.5, 1e-15));
    assert_that!(
        Transform::zipf_log().evaluate(std::f64::consts::E),
        near(1.0, 1e-15)
    );
    assert_that!(Transform::box_cox(1.0).unwrap().evaluate(5.0), near(4.0, 1e-15));
    assert_that!(Transform::box_cox(0.5).unwrap().evaluate(9.0), near(4.0, 1e-15));
}

#[test]
fn test_support_edges_are_clamped() {
    assert_eq!(Transform::exponential(1.0).unwrap().evaluate(-5.0), 0.0);
    assert_eq!(Transform::weibull(0.5, 1.0).unwrap().evaluate(-5.0), 0.0);
    assert_eq!(Transform::pareto(10.0, 2.0).unwrap().evaluate(3.0), 0.0);
    assert_eq!(Transform::zipf_log().evaluate(0.5), 0.0);
    assert_eq!(Transform::zipf_log().evaluate(-100.0), 0.0);

    let lognormal = Transform::lognormal(0.0, 1.0).unwrap();
    assert_eq!(lognormal.evaluate(0.0), lognormal.evaluate(-3.0));
    assert!(lognormal.evaluate(0.0).is_finite());

    let log = Transform::box_cox(0.0).unwrap();
    assert!(log.evaluate(0.0).is_finite());
    assert!(log.evaluate(-1.0).is_finite());
    assert!(Transform::box_cox(-2.0).unwrap().evaluate(0.0).is_finite());
}

#[test]
fn test_every_family_is_monotone_and_finite() {
    let xs: Vec<f64> = (-200..=200).map(|i| f64::from(i) * 0.75).collect();
    for transform in all_families() {
        let mut previous = f64::NEG_INFINITY;
        for &x in &xs {
            let y = transform.evaluate(x);
            assert!(y.is_finite(), "{transform} at {x} gave {y}");
            assert!(y >= previous, "{transform} decreased at {x}");
            previous = y;
        }
    }
}

#[test]
fn test_invalid_parameters() {
    let cases = [
        (Transform::normal(0.0, 0.0), "sigma"),
        (Transform::normal(f64::NAN, 1.0), "mu"),
        (Transform::exponential(-1.0), "lambda"),
        (Transform::lognormal(0.0, f64::INFINITY), "sigma"),
        (Transform::pareto(0.0, 1.0), "xm"),
        (Transform::pareto(1.0, -2.0), "alpha"),
        (Transform::weibull(0.0, 1.0), "shape"),
        (Transform::weibull(1.0, f64::NAN), "scale"),
        (Transform::logistic(f64::NEG_INFINITY, 1.0), "mu"),
        (Transform::logistic(0.0, 0.0), "s"),
        (Transform::zipf_pareto(-1.0, 1.0), "xmin"),
        (Transform::box_cox(f64::NAN), "beta"),
    ];
    for (result, parameter) in cases {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.context_value("parameter"), Some(parameter));
        assert_that!(err.message(), contains_substring(parameter));
    }
}

#[test]
fn test_display() {
    assert_eq!(Transform::uniform().to_string(), "uniform()");
    assert_eq!(
        Transform::normal(0.0, 100.0).unwrap().to_string(),
        "normal(mu=0, sigma=100)"
    );
    assert_eq!(
        Transform::pareto(1.0, 2.5).unwrap().to_string(),
        "pareto(xm=1, alpha=2.5)"
    );
    assert_eq!(
        Transform::box_cox(-0.5).unwrap().to_string(),
        "box_cox(beta=-0.5)"
    );
}

#[test]
fn test_descriptor_equality_and_hashing() {
    let mut seen = HashSet::new();
    for transform in all_families() {
        assert!(seen.insert(transform), "{transform} collided");
    }
    assert!(!seen.insert(Transform::normal(10.0, 3.0).unwrap()));
    assert!(!seen.insert(Transform::default()));

    // same parameters, different family
    assert_ne!(
        Transform::pareto(1.0, 2.1).unwrap(),
        Transform::zipf_pareto(1.0, 2.1).unwrap()
    );
    assert_ne!(
        Transform::normal(0.0, 1.0).unwrap(),
        Transform::normal(0.0, 1.000_000_000_000_001).unwrap()
    );
}

#[test]
fn test_from_parts() {
    for transform in all_families() {
        let rebuilt = Transform::from_parts(transform.family(), transform.params()).unwrap();
        assert_eq!(rebuilt, transform);
        assert_eq!(transform.params().len(), transform.family().arity());
    }

    let err = Transform::from_parts(Family::Weibull, &[1.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.context_value("family"), Some("weibull"));

    let err = Transform::from_parts(Family::Uniform, &[1.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Transform::from_parts(Family::Exponential, &[0.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_family_names() {
    for family in Family::ALL {
        assert_eq!(family.name().parse::<Family>().unwrap(), family);
        assert_eq!(Family::from_id(family.id()), Some(family));
        assert_eq!(family.param_names().len(), family.arity());
    }
    assert_eq!(" LogNormal ".parse::<Family>().unwrap(), Family::LogNormal);
    assert_eq!("BOX_COX".parse::<Family>().unwrap(), Family::BoxCox);

    let err = "beta".parse::<Family>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(Family::from_id(0), None);
    assert_eq!(Family::from_id(11), None);
}

#[test]
fn test_serialize_layout() {
    let transform = Transform::normal(1.5, 2.0).unwrap();
    let bytes = transform.serialize();
    assert_eq!(bytes.len(), 3 + 16);
    assert_eq!(bytes[0], 1, "serial version");
    assert_eq!(bytes[1], Family::Normal.id());
    assert_eq!(bytes[2], 2, "parameter count");
    assert_eq!(&bytes[3..11], &1.5f64.to_le_bytes());
    assert_eq!(&bytes[11..19], &2.0f64.to_le_bytes());

    let bytes = Transform::zipf_log().serialize();
    assert_eq!(bytes, vec![1, Family::ZipfLog.id(), 0]);
}

#[test]
fn test_serialize_restores_every_family() {
    for transform in all_families() {
        let restored = Transform::deserialize(&transform.serialize()).unwrap();
        assert_eq!(restored, transform);
        assert_eq!(restored.evaluate(3.5), transform.evaluate(3.5));
    }
}

#[test]
fn test_deserialize_malformed() {
    let good = Transform::exponential(0.5).unwrap().serialize();

    let err = Transform::deserialize(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_that!(err.message(), contains_substring("serial_version"));

    let err = Transform::deserialize(&good[..good.len() - 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_that!(err.message(), contains_substring("insufficient data"));

    let mut bad_version = good.clone();
    bad_version[0] = 9;
    let err = Transform::deserialize(&bad_version).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_that!(err.message(), contains_substring("serial version"));

    let mut bad_family = good.clone();
    bad_family[1] = 42;
    let err = Transform::deserialize(&bad_family).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_that!(err.message(), contains_substring("unknown family id"));

    let mut bad_count = good.clone();
    bad_count[2] = 2;
    let err = Transform::deserialize(&bad_count).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);

    let mut trailing = good.clone();
    trailing.push(0);
    let err = Transform::deserialize(&trailing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedData);
    assert_that!(err.message(), contains_substring("trailing"));

    let mut bad_param = good;
    bad_param[3..11].copy_from_slice(&(-1.0f64).to_le_bytes());
    let err = Transform::deserialize(&bad_param).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}
