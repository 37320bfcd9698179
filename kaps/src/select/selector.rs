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

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::Catalog;
use super::DEFAULT_DIVISOR;
use super::DEFAULT_FANOUTS;
use super::ProbeBattery;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::search::DEFAULT_MAX_DEPTH;
use crate::search::Kaps;
use crate::search::SearchKey;
use crate::search::Searcher;
use crate::transform::Transform;

/// Scores catalog descriptors by aggregate KAPS depth and picks the best.
///
/// See the [module documentation](super) for the procedure and an example.
#[derive(Debug, Clone)]
pub struct Selector {
    probes: ProbeBattery,
    fanouts: Vec<usize>,
    divisor: usize,
    max_depth: u32,
}

impl Default for Selector {
    fn default() -> Self {
        Selector {
            probes: ProbeBattery::default(),
            fanouts: DEFAULT_FANOUTS.to_vec(),
            divisor: DEFAULT_DIVISOR,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Selector {
    /// Creates a selector with the default probes, fan-outs and divisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probe battery.
    pub fn with_probes(mut self, probes: ProbeBattery) -> Self {
        self.probes = probes;
        self
    }

    /// Sets the fan-out values each probe is searched with.
    pub fn with_fanouts(mut self, fanouts: impl Into<Vec<usize>>) -> Self {
        self.fanouts = fanouts.into();
        self
    }

    /// Sets the shrink divisor used by every search.
    pub fn with_divisor(mut self, divisor: usize) -> Self {
        self.divisor = divisor;
        self
    }

    /// Sets the depth ceiling of every search.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the probe battery.
    pub fn probes(&self) -> &ProbeBattery {
        &self.probes
    }

    /// Returns the fan-out values.
    pub fn fanouts(&self) -> &[usize] {
        &self.fanouts
    }

    /// Returns the shrink divisor.
    pub fn divisor(&self) -> usize {
        self.divisor
    }

    /// Selects the descriptor of `catalog` with the smallest total depth over
    /// `dataset`, which must be sorted ascending.
    ///
    /// A search that reaches the depth ceiling adds the ceiling to its
    /// descriptor's total, so a badly fitting descriptor is penalized rather
    /// than aborting the whole selection.
    ///
    /// Fails with `EmptyInput` if the dataset, the probe battery, the
    /// catalog or the fan-out list is empty, and with `InvalidArgument` if a
    /// fan-out, the divisor or the depth ceiling is zero.
    pub fn select<T: SearchKey + Sync>(
        &self,
        dataset: &[T],
        catalog: &Catalog,
    ) -> Result<Selection, Error> {
        self.check_inputs(dataset)?;
        if catalog.is_empty() {
            return Err(Error::empty_input("catalog"));
        }

        let targets = self.probes.targets(dataset);

        #[cfg(feature = "rayon")]
        let totals = catalog
            .as_slice()
            .par_iter()
            .map(|transform| self.total_depth(dataset, &targets, *transform))
            .collect::<Result<Vec<_>, Error>>()?;
        #[cfg(not(feature = "rayon"))]
        let totals = catalog
            .iter()
            .map(|transform| self.total_depth(dataset, &targets, *transform))
            .collect::<Result<Vec<_>, Error>>()?;

        let scores = ScoreTable {
            entries: catalog.iter().copied().zip(totals).collect(),
        };
        let (best, total_depth) = scores
            .best()
            .ok_or_else(|| Error::empty_input("catalog"))?;

        tracing::debug!(
            catalog = catalog.len(),
            probes = targets.len(),
            fanouts = ?self.fanouts,
            best = %best,
            total_depth,
            "selected transform"
        );

        Ok(Selection {
            best,
            total_depth,
            scores,
        })
    }

    /// Total depth of one descriptor over `dataset`, using the configured
    /// probes and fan-outs.
    ///
    /// Fails on the same configurations as [`Selector::select`].
    pub fn score<T: SearchKey>(&self, dataset: &[T], transform: Transform) -> Result<u64, Error> {
        self.check_inputs(dataset)?;
        let targets = self.probes.targets(dataset);
        self.total_depth(dataset, &targets, transform)
    }

    fn check_inputs<T>(&self, dataset: &[T]) -> Result<(), Error> {
        if dataset.is_empty() {
            return Err(Error::empty_input("dataset"));
        }
        if self.probes.is_empty() {
            return Err(Error::empty_input("probe battery"));
        }
        if self.fanouts.is_empty() {
            return Err(Error::empty_input("fanout values"));
        }
        // builds every engine once, surfacing argument errors up front
        self.engines(Transform::uniform())?;
        Ok(())
    }

    fn engines(&self, transform: Transform) -> Result<Vec<Kaps>, Error> {
        self.fanouts
            .iter()
            .map(|&fanout| Kaps::new(fanout, self.divisor, transform)?.with_max_depth(self.max_depth))
            .collect()
    }

    fn total_depth<T: SearchKey>(
        &self,
        dataset: &[T],
        targets: &[T],
        transform: Transform,
    ) -> Result<u64, Error> {
        let engines = self.engines(transform)?;
        let mut total = 0u64;
        for &target in targets {
            for engine in &engines {
                let depth = match engine.search(dataset, target) {
                    Ok(result) => result.depth(),
                    Err(err) if err.kind() == ErrorKind::DepthExceeded => {
                        tracing::debug!(
                            transform = %transform,
                            fanout = engine.fanout(),
                            "search hit the depth ceiling, scoring the ceiling"
                        );
                        self.max_depth
                    }
                    Err(err) => return Err(err.with_context("transform", transform)),
                };
                total += u64::from(depth);
            }
        }
        tracing::trace!(transform = %transform, total, "scored transform");
        Ok(total)
    }
}

/// Selects the best descriptor of `catalog` for `dataset` with the given
/// probes and fan-outs and the default divisor.
///
/// # Examples
///
/// ```
/// use kaps::select::{select, Catalog, ProbeBattery};
/// use kaps::transform::Transform;
///
/// let data: Vec<f64> = (0..500).map(|i| i as f64).collect();
/// let catalog: Catalog = [Transform::uniform(), Transform::zipf_log()].into_iter().collect();
/// let probes = ProbeBattery::default();
///
/// let selection = select(&data, &catalog, &probes, &[2, 4, 8]).unwrap();
/// assert_eq!(selection.best(), Transform::uniform());
/// ```
pub fn select<T: SearchKey + Sync>(
    dataset: &[T],
    catalog: &Catalog,
    probes: &ProbeBattery,
    fanouts: &[usize],
) -> Result<Selection, Error> {
    Selector::new()
        .with_probes(probes.clone())
        .with_fanouts(fanouts)
        .select(dataset, catalog)
}

/// Total depth per descriptor, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    entries: Vec<(Transform, u64)>,
}

impl ScoreTable {
    /// Returns the total depth recorded for `transform`.
    pub fn get(&self, transform: &Transform) -> Option<u64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == transform)
            .map(|(_, total)| *total)
    }

    /// Iterates over `(descriptor, total depth)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&Transform, u64)> + '_ {
        self.entries.iter().map(|(transform, total)| (transform, *total))
    }

    /// Returns the number of scored descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The descriptor with the strictly smallest total; the first one wins
    /// ties.
    pub fn best(&self) -> Option<(Transform, u64)> {
        let mut best: Option<(Transform, u64)> = None;
        for &(transform, total) in &self.entries {
            match best {
                Some((_, best_total)) if total >= best_total => {}
                _ => best = Some((transform, total)),
            }
        }
        best
    }
}

/// The outcome of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    best: Transform,
    total_depth: u64,
    scores: ScoreTable,
}

impl Selection {
    /// Returns the winning descriptor.
    pub fn best(&self) -> Transform {
        self.best
    }

    /// Returns the total depth of the winning descriptor.
    pub fn total_depth(&self) -> u64 {
        self.total_depth
    }

    /// Returns the totals of every descriptor.
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// Builds a search engine around the winning descriptor.
    pub fn engine(&self, fanout: usize, divisor: usize) -> Result<Kaps, Error> {
        Kaps::new(fanout, divisor, self.best)
    }
}
