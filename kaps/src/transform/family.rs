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

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The distribution families a [`Transform`](super::Transform) can model.
///
/// Each family has a stable name (used for display and parsing), a stable
/// numeric id (used in the encoded descriptor) and a fixed parameter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Identity transform; assumes uniformly spread values.
    Uniform,
    /// Normal CDF with location `mu` and scale `sigma`.
    Normal,
    /// Exponential CDF with rate `lambda`.
    Exponential,
    /// Lognormal CDF with log-location `mu` and log-scale `sigma`.
    LogNormal,
    /// Pareto CDF with minimum `xm` and shape `alpha`.
    Pareto,
    /// Weibull CDF with `shape` and `scale`.
    Weibull,
    /// Logistic CDF with location `mu` and scale `s`.
    Logistic,
    /// Plain log transform, a parameter-free proxy for Zipf-like data.
    ZipfLog,
    /// Continuous Pareto surrogate for discrete power-law data.
    ZipfPareto,
    /// Box–Cox power transform with exponent `beta`.
    BoxCox,
}

impl Family {
    /// Every family, in id order.
    pub const ALL: [Family; 10] = [
        Family::Uniform,
        Family::Normal,
        Family::Exponential,
        Family::LogNormal,
        Family::Pareto,
        Family::Weibull,
        Family::Logistic,
        Family::ZipfLog,
        Family::ZipfPareto,
        Family::BoxCox,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Family::Uniform => "uniform",
            Family::Normal => "normal",
            Family::Exponential => "exponential",
            Family::LogNormal => "lognormal",
            Family::Pareto => "pareto",
            Family::Weibull => "weibull",
            Family::Logistic => "logistic",
            Family::ZipfLog => "zipf_log",
            Family::ZipfPareto => "zipf_pareto",
            Family::BoxCox => "box_cox",
        }
    }

    /// Stable id used by the descriptor encoding.
    pub const fn id(self) -> u8 {
        match self {
            Family::Uniform => 1,
            Family::Normal => 2,
            Family::Exponential => 3,
            Family::LogNormal => 4,
            Family::Pareto => 5,
            Family::Weibull => 6,
            Family::Logistic => 7,
            Family::ZipfLog => 8,
            Family::ZipfPareto => 9,
            Family::BoxCox => 10,
        }
    }

    /// Number of parameters a transform of this family carries.
    pub const fn arity(self) -> usize {
        match self {
            Family::Uniform | Family::ZipfLog => 0,
            Family::Exponential | Family::BoxCox => 1,
            Family::Normal
            | Family::LogNormal
            | Family::Pareto
            | Family::Weibull
            | Family::Logistic
            | Family::ZipfPareto => 2,
        }
    }

    /// Parameter names, in the order [`Transform::params`](super::Transform::params) returns them.
    pub const fn param_names(self) -> &'static [&'static str] {
        match self {
            Family::Uniform | Family::ZipfLog => &[],
            Family::Normal | Family::LogNormal => &["mu", "sigma"],
            Family::Exponential => &["lambda"],
            Family::Pareto => &["xm", "alpha"],
            Family::Weibull => &["shape", "scale"],
            Family::Logistic => &["mu", "s"],
            Family::ZipfPareto => &["xmin", "alpha"],
            Family::BoxCox => &["beta"],
        }
    }

    /// Look up a family by its encoded id.
    pub fn from_id(id: u8) -> Option<Family> {
        Family::ALL.into_iter().find(|family| family.id() == id)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Family::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                Error::invalid_argument(format!("unknown distribution family: {needle:?}"))
            })
    }
}
