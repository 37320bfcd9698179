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

use crate::error::Error;
use crate::transform::Family;
use crate::transform::Transform;

/// An ordered, duplicate-free list of candidate descriptors.
///
/// Insertion order is iteration order, which also decides ties during
/// selection. Pushing a descriptor equal to one already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Transform>,
    seen: HashSet<Transform>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor; returns false if an equal one was already present.
    pub fn push(&mut self, transform: Transform) -> bool {
        if !self.seen.insert(transform) {
            return false;
        }
        self.entries.push(transform);
        true
    }

    /// Returns the number of descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if an equal descriptor is present.
    pub fn contains(&self, transform: &Transform) -> bool {
        self.seen.contains(transform)
    }

    /// Returns the descriptors in order.
    pub fn as_slice(&self) -> &[Transform] {
        &self.entries
    }

    /// Iterates over the descriptors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.entries.iter()
    }

    /// The fixed parameter grid: a cross product of every family with a
    /// log- or linearly-spaced set of parameters, covering scales from 1e-10
    /// to 1e9.
    ///
    /// Built identically on every call.
    pub fn default_grid() -> Self {
        let mut catalog = Catalog::new();
        catalog.push(Transform::uniform());
        catalog.extend((-10..10).flat_map(|i| Transform::normal(0.0, 10f64.powi(i))));
        catalog.extend((-10..10).flat_map(|i| Transform::exponential(10f64.powi(i))));
        catalog.extend((1..20).flat_map(|i| Transform::lognormal(0.0, i as f64 / 2.0)));
        catalog.extend((10..100).flat_map(|i| Transform::pareto(1.0, i as f64 / 10.0)));
        for i in 1..30 {
            let shape = i as f64 / 10.0;
            catalog.extend((2..9).flat_map(|j| Transform::weibull(shape, 10f64.powi(j))));
        }
        catalog.extend((1..10).flat_map(|i| Transform::logistic(0.0, 10f64.powi(i))));
        catalog.push(Transform::zipf_log());
        catalog.extend((11..100).flat_map(|i| Transform::zipf_pareto(1.0, i as f64 / 10.0)));
        catalog.extend(
            [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0]
                .into_iter()
                .flat_map(Transform::box_cox),
        );
        catalog
    }

    /// One descriptor per family, with parameters estimated from `sample`.
    ///
    /// Fails with `EmptyInput` if `sample` is empty.
    pub fn fitted(sample: &[f64]) -> Result<Self, Error> {
        let mut catalog = Catalog::new();
        for family in Family::ALL {
            if family == Family::ZipfPareto {
                // same fit as pareto, would only duplicate it
                continue;
            }
            catalog.push(Transform::fit(family, sample)?);
        }
        Ok(catalog)
    }
}

impl Extend<Transform> for Catalog {
    fn extend<I: IntoIterator<Item = Transform>>(&mut self, iter: I) {
        for transform in iter {
            self.push(transform);
        }
    }
}

impl FromIterator<Transform> for Catalog {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
