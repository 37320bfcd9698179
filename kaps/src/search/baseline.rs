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

//! Baseline engines that KAPS depths are compared against.

use super::DEFAULT_MAX_DEPTH;
use super::DepthCounter;
use super::Outcome;
use super::SearchKey;
use super::SearchResult;
use super::Searcher;
use super::check_max_depth;
use super::check_window;
use crate::error::Error;

/// Classic binary search, one step per halving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySearch {
    max_depth: u32,
}

impl Default for BinarySearch {
    fn default() -> Self {
        BinarySearch {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BinarySearch {
    /// Creates a binary search with the default depth ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth ceiling. Fails with `InvalidArgument` if it is zero.
    pub fn with_max_depth(mut self, max_depth: u32) -> Result<Self, Error> {
        self.max_depth = check_max_depth(max_depth)?;
        Ok(self)
    }
}

impl Searcher for BinarySearch {
    fn search_window<T: SearchKey>(
        &self,
        dataset: &[T],
        lo: usize,
        hi: usize,
        target: T,
    ) -> Result<SearchResult, Error> {
        check_window(dataset.len(), lo, hi)?;

        let mut depth = DepthCounter::new(self.max_depth);
        // half-open [lo, end)
        let mut lo = lo;
        let mut end = hi + 1;
        loop {
            depth.step()?;
            if lo >= end {
                return Ok(depth.finish(Outcome::NotFound));
            }
            let mid = lo + (end - lo) / 2;
            let value = dataset[mid];
            if value == target {
                return Ok(depth.finish(Outcome::Found(mid)));
            } else if value < target {
                lo = mid + 1;
            } else if value > target {
                end = mid;
            } else {
                return Ok(depth.finish(Outcome::NotFound));
            }
        }
    }
}

/// Two-way interpolation search with linear interpolation of the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationSearch {
    max_depth: u32,
}

impl Default for InterpolationSearch {
    fn default() -> Self {
        InterpolationSearch {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InterpolationSearch {
    /// Creates an interpolation search with the default depth ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth ceiling. Fails with `InvalidArgument` if it is zero.
    pub fn with_max_depth(mut self, max_depth: u32) -> Result<Self, Error> {
        self.max_depth = check_max_depth(max_depth)?;
        Ok(self)
    }
}

impl Searcher for InterpolationSearch {
    fn search_window<T: SearchKey>(
        &self,
        dataset: &[T],
        lo: usize,
        hi: usize,
        target: T,
    ) -> Result<SearchResult, Error> {
        check_window(dataset.len(), lo, hi)?;

        let mut depth = DepthCounter::new(self.max_depth);
        // half-open [lo, end)
        let mut lo = lo;
        let mut end = hi + 1;
        loop {
            depth.step()?;
            if lo >= end {
                return Ok(depth.finish(Outcome::NotFound));
            }
            let hi = end - 1;
            let lo_value = dataset[lo];
            let hi_value = dataset[hi];
            if !(lo_value <= target && target <= hi_value) {
                return Ok(depth.finish(Outcome::NotFound));
            }
            if lo_value == hi_value {
                let outcome = if lo_value == target {
                    Outcome::Found(lo)
                } else {
                    Outcome::NotFound
                };
                return Ok(depth.finish(outcome));
            }

            let pos = probe(lo, hi, lo_value, hi_value, target);
            let value = dataset[pos];
            if value == target {
                return Ok(depth.finish(Outcome::Found(pos)));
            } else if value < target {
                lo = pos + 1;
            } else {
                end = pos;
            }
        }
    }
}

fn probe<T: SearchKey>(lo: usize, hi: usize, lo_value: T, hi_value: T, target: T) -> usize {
    let (a, b, x) = (lo_value.as_f64(), hi_value.as_f64(), target.as_f64());
    let fraction = ((x - a) / (b - a)).clamp(0.0, 1.0);
    let offset = (fraction * (hi - lo) as f64).floor() as usize;
    (lo + offset).min(hi)
}
