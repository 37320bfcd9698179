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

use super::DEFAULT_PERCENTILES;
use crate::error::Error;
use crate::search::SearchKey;

/// Relative rank positions used to derive probe targets from a dataset.
///
/// Every fraction lies strictly inside `(0, 1)`. The same battery is used
/// for every descriptor a selector compares, so their scores are
/// commensurable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeBattery {
    fractions: Vec<f64>,
}

impl Default for ProbeBattery {
    fn default() -> Self {
        ProbeBattery {
            fractions: DEFAULT_PERCENTILES.iter().map(|p| p / 100.0).collect(),
        }
    }
}

impl ProbeBattery {
    /// Creates a battery from fractions in `(0, 1)`.
    ///
    /// Fails with `InvalidArgument` if any fraction is outside that range or
    /// not finite. An empty battery is accepted here and rejected when a
    /// selection runs.
    pub fn new(fractions: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let fractions = fractions.into();
        if let Some(bad) = fractions.iter().find(|f| !(**f > 0.0 && **f < 1.0)) {
            return Err(Error::invalid_argument(format!(
                "probe fractions must lie in (0, 1), got {bad}"
            )));
        }
        Ok(ProbeBattery { fractions })
    }

    /// Creates a battery from percentiles in `(0, 100)`.
    pub fn from_percentiles(percentiles: &[f64]) -> Result<Self, Error> {
        Self::new(percentiles.iter().map(|p| p / 100.0).collect::<Vec<_>>())
    }

    /// Returns the fractions in order.
    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Returns the number of probes.
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    /// Returns true if the battery has no probes.
    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    /// Derives concrete targets by nearest-rank lookup:
    /// `dataset[min(floor(f * n), n - 1)]` for each fraction `f`.
    ///
    /// Returns no targets for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaps::select::ProbeBattery;
    ///
    /// let battery = ProbeBattery::new(vec![0.1, 0.5, 0.99]).unwrap();
    /// let data: Vec<u32> = (0..10).map(|i| i * 10).collect();
    /// assert_eq!(battery.targets(&data), vec![10, 50, 90]);
    /// ```
    pub fn targets<T: SearchKey>(&self, dataset: &[T]) -> Vec<T> {
        let n = dataset.len();
        if n == 0 {
            return Vec::new();
        }
        self.fractions
            .iter()
            .map(|f| {
                let index = ((f * n as f64) as usize).min(n - 1);
                dataset[index]
            })
            .collect()
    }
}
