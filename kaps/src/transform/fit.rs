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

//! Closed-form parameter estimators for the transform families.
//!
//! Each adapter maps a non-empty sample to parameters inside its family's
//! domain. Degenerate samples (for example, all values equal) are handled by
//! flooring variances, means and spreads at a tiny positive value, so the
//! result is always usable to build a [`Transform`]. Non-finite values are
//! ignored, and sums that would overflow are rescaled, so samples close to
//! `f64::MAX` still yield finite parameters.

use super::Family;
use super::Transform;
use super::function::LOG_FLOOR;
use crate::error::Error;

const VARIANCE_FLOOR: f64 = 1e-300;
const MEAN_FLOOR: f64 = 1e-300;
const SPREAD_FLOOR: f64 = 1e-300;
const HILL_DENOMINATOR_FLOOR: f64 = 1e-300;
const PARETO_ALPHA_FLOOR: f64 = 1e-6;

/// Sample mean and standard deviation (`n − 1` denominator).
pub fn fit_normal(sample: &[f64]) -> Result<(f64, f64), Error> {
    ensure_non_empty(sample)?;
    Ok(mean_and_std(sample))
}

/// Rate as the inverse sample mean. Assumes non-negative data.
pub fn fit_exponential(sample: &[f64]) -> Result<f64, Error> {
    ensure_non_empty(sample)?;
    Ok(1.0 / mean(sample).max(MEAN_FLOOR))
}

/// Mean and standard deviation of the log-sample.
pub fn fit_lognormal(sample: &[f64]) -> Result<(f64, f64), Error> {
    ensure_non_empty(sample)?;
    let logs: Vec<f64> = sample.iter().map(|x| x.max(LOG_FLOOR).ln()).collect();
    Ok(mean_and_std(&logs))
}

/// Hill estimator for the Pareto shape.
///
/// Only finite positive values take part. The scale `xm` is `threshold` when
/// it is finite and positive, otherwise the smallest positive value; `alpha`
/// is estimated from the values at or above `xm`. A sample with no positive
/// values yields `(1, 1)`.
pub fn fit_pareto(sample: &[f64], threshold: Option<f64>) -> Result<(f64, f64), Error> {
    ensure_non_empty(sample)?;
    let positives: Vec<f64> = sample
        .iter()
        .copied()
        .filter(|x| x.is_finite() && *x > 0.0)
        .collect();
    if positives.is_empty() {
        return Ok((1.0, 1.0));
    }

    let xm = match threshold {
        Some(t) if t.is_finite() && t > 0.0 => t,
        _ => positives.iter().copied().fold(f64::INFINITY, f64::min),
    };

    let mut tail_len = 0usize;
    let mut log_sum = 0.0;
    for x in positives.iter().filter(|x| **x >= xm) {
        tail_len += 1;
        log_sum += (x / xm).ln();
    }
    let alpha = tail_len as f64 / log_sum.max(HILL_DENOMINATOR_FLOOR);
    Ok((xm, alpha.clamp(PARETO_ALPHA_FLOOR, f64::MAX)))
}

/// Location from the median, scale from the interquartile range
/// (a logistic law has `IQR = 2·s·ln 3`).
pub fn fit_logistic(sample: &[f64]) -> Result<(f64, f64), Error> {
    ensure_non_empty(sample)?;
    let mut xs: Vec<f64> = finite(sample).collect();
    if xs.is_empty() {
        return Ok((0.0, SPREAD_FLOOR / (2.0 * 3.0f64.ln())));
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    let median = if n % 2 == 1 {
        xs[n / 2]
    } else {
        // halved first so the sum cannot overflow
        0.5 * xs[n / 2 - 1] + 0.5 * xs[n / 2]
    };
    let iqr = (xs[(3 * n) / 4] - xs[n / 4]).clamp(SPREAD_FLOOR, f64::MAX);
    Ok((median, iqr / (2.0 * 3.0f64.ln())))
}

/// Shape 1 and the sample mean as scale, i.e. the exponential special case.
pub fn fit_weibull(sample: &[f64]) -> Result<(f64, f64), Error> {
    ensure_non_empty(sample)?;
    Ok((1.0, mean(sample).max(MEAN_FLOOR)))
}

impl Transform {
    /// Builds a transform of `family` with parameters estimated from `sample`.
    ///
    /// Parameter-free families ignore the sample; Box–Cox uses the `ln x`
    /// limit. Fails with `EmptyInput` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaps::transform::{Family, Transform};
    ///
    /// let g = Transform::fit(Family::Exponential, &[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(g.params(), &[0.5]);
    /// ```
    pub fn fit(family: Family, sample: &[f64]) -> Result<Self, Error> {
        ensure_non_empty(sample)?;
        match family {
            Family::Uniform => Ok(Self::uniform()),
            Family::Normal => {
                let (mu, sigma) = fit_normal(sample)?;
                Self::normal(mu, sigma)
            }
            Family::Exponential => Self::exponential(fit_exponential(sample)?),
            Family::LogNormal => {
                let (mu, sigma) = fit_lognormal(sample)?;
                Self::lognormal(mu, sigma)
            }
            Family::Pareto => {
                let (xm, alpha) = fit_pareto(sample, None)?;
                Self::pareto(xm, alpha)
            }
            Family::Weibull => {
                let (shape, scale) = fit_weibull(sample)?;
                Self::weibull(shape, scale)
            }
            Family::Logistic => {
                let (mu, s) = fit_logistic(sample)?;
                Self::logistic(mu, s)
            }
            Family::ZipfLog => Ok(Self::zipf_log()),
            Family::ZipfPareto => {
                let (xmin, alpha) = fit_pareto(sample, None)?;
                Self::zipf_pareto(xmin, alpha)
            }
            Family::BoxCox => Self::box_cox(0.0),
        }
    }

    /// Completes a possibly partial descriptor.
    ///
    /// With at least [`Family::arity`] parameters the leading ones are used
    /// as-is. With fewer, the family is fitted from `sample`, except that a
    /// single parameter for `pareto` or `zipf_pareto` is kept as the shape and
    /// only the scale is estimated.
    pub fn resolve(family: Family, params: &[f64], sample: &[f64]) -> Result<Self, Error> {
        let arity = family.arity();
        if params.len() >= arity {
            return Self::from_parts(family, &params[..arity]);
        }
        match (family, params) {
            (Family::Pareto | Family::ZipfPareto, &[alpha]) => {
                let (xm, _) = fit_pareto(sample, None)?;
                Self::from_parts(family, &[xm, alpha])
            }
            _ => Self::fit(family, sample),
        }
    }
}

fn ensure_non_empty(sample: &[f64]) -> Result<(), Error> {
    if sample.is_empty() {
        Err(Error::empty_input("sample"))
    } else {
        Ok(())
    }
}

fn finite(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|x| x.is_finite())
}

/// Largest magnitude among the finite values, used to rescale sums that
/// overflow.
fn magnitude(values: &[f64]) -> f64 {
    finite(values).fold(0.0, |m, x| m.max(x.abs()))
}

/// Mean of the finite values, `0` if there are none. Always finite.
fn mean(values: &[f64]) -> f64 {
    let n = finite(values).count();
    if n == 0 {
        return 0.0;
    }
    let sum = finite(values).sum::<f64>();
    if sum.is_finite() {
        return sum / n as f64;
    }
    let scale = magnitude(values);
    let scaled = finite(values).map(|x| x / scale).sum::<f64>() / n as f64;
    (scaled * scale).clamp(-f64::MAX, f64::MAX)
}

/// Mean and standard deviation of the finite values. Both are finite and
/// the deviation is at least `sqrt(VARIANCE_FLOOR)`.
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = finite(values).count();
    let std_floor = VARIANCE_FLOOR.sqrt();
    if n == 0 {
        return (0.0, std_floor);
    }
    let mu = mean(values);
    let denominator = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let variance = finite(values).map(|x| (x - mu) * (x - mu)).sum::<f64>() / denominator;
    if variance.is_finite() {
        return (mu, variance.max(VARIANCE_FLOOR).sqrt());
    }
    let scale = magnitude(values);
    let scaled_mu = mu / scale;
    let scaled_variance = finite(values)
        .map(|x| (x / scale - scaled_mu) * (x / scale - scaled_mu))
        .sum::<f64>()
        / denominator;
    let std = (scaled_variance.sqrt() * scale).clamp(std_floor, f64::MAX);
    (mu, std)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let (mu, sigma) = mean_and_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mu, 5.0);
        assert!((sigma - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_uses_unit_denominator() {
        let (mu, sigma) = mean_and_std(&[3.0]);
        assert_eq!(mu, 3.0);
        assert_eq!(sigma, VARIANCE_FLOOR.sqrt());
    }

    #[test]
    fn test_overflowing_sums_are_rescaled() {
        let values = [f64::MAX, f64::MAX, -f64::MAX];
        let mu = mean(&values);
        assert!((mu - f64::MAX / 3.0).abs() <= f64::MAX * 1e-12);

        let (mu, sigma) = mean_and_std(&values);
        assert!(mu.is_finite());
        assert!(sigma.is_finite() && sigma > 0.0);
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        assert_eq!(mean(&[1.0, f64::INFINITY, 3.0, f64::NAN]), 2.0);
        assert_eq!(mean(&[f64::NAN]), 0.0);
        assert_eq!(mean_and_std(&[f64::NEG_INFINITY]), (0.0, VARIANCE_FLOOR.sqrt()));
    }
}
