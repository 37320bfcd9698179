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

use std::f64::consts::SQRT_2;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use super::Family;
use crate::error::Error;

/// Floor applied to arguments of logarithms so they stay finite.
pub(crate) const LOG_FLOOR: f64 = 1e-300;
/// Box–Cox exponents closer to zero than this use the `ln x` limit.
const BOX_COX_LOG_THRESHOLD: f64 = 1e-12;
/// Floor applied to Box–Cox inputs when the exponent is negative.
const BOX_COX_NEGATIVE_FLOOR: f64 = 1e-12;

/// A monotonic transform approximating the CDF of a hypothesized distribution.
///
/// A transform is plain data, a [`Family`] tag plus its parameters, so it
/// doubles as a descriptor: two transforms compare equal (and hash equally)
/// iff they have the same family and bitwise-equal parameters. All parameters
/// are validated on construction, and [`evaluate`](Transform::evaluate)
/// clamps inputs at the edges of the family's support so it is finite for
/// every finite input.
///
/// # Examples
///
/// ```
/// use kaps::transform::Transform;
///
/// let g = Transform::exponential(0.5).unwrap();
/// assert_eq!(g.evaluate(-3.0), 0.0);
/// assert!(g.evaluate(1.0) < g.evaluate(2.0));
/// assert_eq!(g.to_string(), "exponential(lambda=0.5)");
/// ```
#[derive(Clone, Copy)]
pub struct Transform {
    family: Family,
    params: [f64; 2],
}

impl Transform {
    /// The identity transform.
    pub const fn uniform() -> Self {
        Self {
            family: Family::Uniform,
            params: [0.0; 2],
        }
    }

    /// Normal CDF `Φ((x − mu) / sigma)`.
    ///
    /// Fails with `InvalidParameter` unless `mu` is finite and `sigma > 0`.
    pub fn normal(mu: f64, sigma: f64) -> Result<Self, Error> {
        let mu = finite("mu", mu)?;
        let sigma = positive("sigma", sigma)?;
        Ok(Self::with_params(Family::Normal, [mu, sigma]))
    }

    /// Exponential CDF `1 − e^(−lambda·x)`, zero for negative `x`.
    pub fn exponential(lambda: f64) -> Result<Self, Error> {
        let lambda = positive("lambda", lambda)?;
        Ok(Self::with_params(Family::Exponential, [lambda, 0.0]))
    }

    /// Lognormal CDF `Φ((ln x − mu) / sigma)`.
    pub fn lognormal(mu: f64, sigma: f64) -> Result<Self, Error> {
        let mu = finite("mu", mu)?;
        let sigma = positive("sigma", sigma)?;
        Ok(Self::with_params(Family::LogNormal, [mu, sigma]))
    }

    /// Pareto CDF `1 − (xm / x)^alpha`, zero below `xm`.
    pub fn pareto(xm: f64, alpha: f64) -> Result<Self, Error> {
        let xm = positive("xm", xm)?;
        let alpha = positive("alpha", alpha)?;
        Ok(Self::with_params(Family::Pareto, [xm, alpha]))
    }

    /// Weibull CDF `1 − e^(−(x / scale)^shape)`, zero for negative `x`.
    pub fn weibull(shape: f64, scale: f64) -> Result<Self, Error> {
        let shape = positive("shape", shape)?;
        let scale = positive("scale", scale)?;
        Ok(Self::with_params(Family::Weibull, [shape, scale]))
    }

    /// Logistic CDF `1 / (1 + e^(−(x − mu) / s))`.
    pub fn logistic(mu: f64, s: f64) -> Result<Self, Error> {
        let mu = finite("mu", mu)?;
        let s = positive("s", s)?;
        Ok(Self::with_params(Family::Logistic, [mu, s]))
    }

    /// `ln max(x, 1)`, a parameter-free proxy for Zipf-like data.
    pub const fn zipf_log() -> Self {
        Self {
            family: Family::ZipfLog,
            params: [0.0; 2],
        }
    }

    /// Continuous Pareto surrogate for discrete power-law data.
    pub fn zipf_pareto(xmin: f64, alpha: f64) -> Result<Self, Error> {
        let xmin = positive("xmin", xmin)?;
        let alpha = positive("alpha", alpha)?;
        Ok(Self::with_params(Family::ZipfPareto, [xmin, alpha]))
    }

    /// Box–Cox transform `(x^beta − 1) / beta`, or `ln x` as `beta → 0`.
    pub fn box_cox(beta: f64) -> Result<Self, Error> {
        let beta = finite("beta", beta)?;
        Ok(Self::with_params(Family::BoxCox, [beta, 0.0]))
    }

    /// Rebuild a transform from a family and its parameters.
    ///
    /// `params` must hold exactly [`Family::arity`] values, in the order
    /// [`Transform::params`] returns them.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaps::transform::{Family, Transform};
    ///
    /// let g = Transform::weibull(1.5, 100.0).unwrap();
    /// let rebuilt = Transform::from_parts(g.family(), g.params()).unwrap();
    /// assert_eq!(g, rebuilt);
    /// assert!(Transform::from_parts(Family::Normal, &[0.0]).is_err());
    /// ```
    pub fn from_parts(family: Family, params: &[f64]) -> Result<Self, Error> {
        if params.len() != family.arity() {
            return Err(Error::invalid_argument(format!(
                "{family} takes {} parameters, got {}",
                family.arity(),
                params.len()
            ))
            .with_context("family", family));
        }
        match family {
            Family::Uniform => Ok(Self::uniform()),
            Family::Normal => Self::normal(params[0], params[1]),
            Family::Exponential => Self::exponential(params[0]),
            Family::LogNormal => Self::lognormal(params[0], params[1]),
            Family::Pareto => Self::pareto(params[0], params[1]),
            Family::Weibull => Self::weibull(params[0], params[1]),
            Family::Logistic => Self::logistic(params[0], params[1]),
            Family::ZipfLog => Ok(Self::zipf_log()),
            Family::ZipfPareto => Self::zipf_pareto(params[0], params[1]),
            Family::BoxCox => Self::box_cox(params[0]),
        }
    }

    /// Returns the family of this transform.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the parameters of this transform; the length is the family arity.
    pub fn params(&self) -> &[f64] {
        &self.params[..self.family.arity()]
    }

    /// Evaluates the transform at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let [p0, p1] = self.params;
        match self.family {
            Family::Uniform => x,
            Family::Normal => normal_cdf((x - p0) / p1),
            Family::Exponential => -(-p0 * x.max(0.0)).exp_m1(),
            Family::LogNormal => normal_cdf((x.max(LOG_FLOOR).ln() - p0) / p1),
            Family::Pareto | Family::ZipfPareto => pareto_cdf(x, p0, p1),
            Family::Weibull => -(-(x.max(0.0) / p1).powf(p0)).exp_m1(),
            Family::Logistic => 1.0 / (1.0 + (-(x - p0) / p1).exp()),
            Family::ZipfLog => x.max(1.0).ln(),
            Family::BoxCox => box_cox(x, p0),
        }
    }

    fn with_params(family: Family, params: [f64; 2]) -> Self {
        Self { family, params }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::uniform()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self
                .params()
                .iter()
                .zip(other.params())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Transform {}

impl Hash for Transform {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        for param in self.params() {
            param.to_bits().hash(state);
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("family", &self.family)
            .field("params", &self.params())
            .finish()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.family)?;
        let names = self.family.param_names();
        for (i, (name, value)) in names.iter().zip(self.params()).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + libm::erf(z / SQRT_2))
}

fn pareto_cdf(x: f64, xm: f64, alpha: f64) -> f64 {
    if x < xm {
        return 0.0;
    }
    // 1 - (xm/x)^alpha, kept precise just above xm
    -(alpha * (xm / x).ln()).exp_m1()
}

fn box_cox(x: f64, beta: f64) -> f64 {
    if beta.abs() < BOX_COX_LOG_THRESHOLD {
        return x.max(LOG_FLOOR).ln();
    }
    let base = if beta > 0.0 {
        x.max(0.0)
    } else {
        x.max(BOX_COX_NEGATIVE_FLOOR)
    };
    (base.powf(beta) - 1.0) / beta
}

// Adding 0.0 folds -0.0 into 0.0 so bitwise equality matches numeric equality.
fn finite(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value + 0.0)
    } else {
        Err(Error::invalid_parameter(name, value, "finite"))
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid_parameter(name, value, "finite and > 0"))
    }
}
