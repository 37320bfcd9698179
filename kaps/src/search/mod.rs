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

//! K-ary predictive search over sorted numeric data.
//!
//! [`Kaps`] generalizes interpolation search to k-way branching: values are
//! mapped through a [`Transform`](crate::transform::Transform) that
//! approximates the data's CDF, the target is interpolated in that space to
//! pick one of `k` buckets of the current window, and the search continues
//! in the chosen bucket with a fan-out that shrinks as the window narrows.
//!
//! Every engine reports a [`SearchResult`]: the [`Outcome`] and the number of
//! steps (the *depth*) the call took. Depth is per-call state, so engines can
//! be shared freely across threads. The binary and interpolation baselines
//! follow the same convention so depths are directly comparable.
//!
//! # Usage
//!
//! ```rust
//! # use kaps::search::{Kaps, Outcome, Searcher};
//! # use kaps::transform::Transform;
//! let data = [10, 20, 30, 40, 50];
//! let kaps = Kaps::new(2, 2, Transform::uniform()).unwrap();
//!
//! let result = kaps.search(&data, 30).unwrap();
//! assert_eq!(result.outcome(), Outcome::Found(2));
//!
//! let result = kaps.search(&data, 5).unwrap();
//! assert_eq!(result.outcome(), Outcome::NotFound);
//! assert_eq!(result.depth(), 1);
//! ```

mod baseline;
mod kaps;

pub use self::baseline::BinarySearch;
pub use self::baseline::InterpolationSearch;
pub use self::kaps::Kaps;
pub use self::kaps::search;

use crate::error::Error;

/// Default ceiling on the number of steps a single search may take.
pub const DEFAULT_MAX_DEPTH: u32 = 1000;

/// Numeric element types a search can run over.
pub trait SearchKey: Copy + PartialOrd {
    /// Converts to f64 for evaluating transforms and interpolating.
    fn as_f64(self) -> f64;
}

macro_rules! impl_search_key {
    ($($name:ty),* $(,)?) => {
        $(
            impl SearchKey for $name {
                #[inline(always)]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_search_key!(f32, f64, i32, i64, u32, u64, usize);

/// Whether a search located its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The target sits at this index.
    Found(usize),
    /// The target is not in the searched window.
    NotFound,
}

/// The outcome of one search together with the depth it consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    outcome: Outcome,
    depth: u32,
}

impl SearchResult {
    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the number of steps taken, at least 1.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the index of the target when it was found.
    pub fn index(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Found(index) => Some(index),
            Outcome::NotFound => None,
        }
    }

    /// Returns true if the target was found.
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }
}

/// A depth-instrumented search over an ascending slice.
///
/// Implementations must count every step, including the first, and must not
/// keep per-call state outside the call.
pub trait Searcher {
    /// Searches the inclusive window `[lo, hi]` of `dataset` for `target`.
    ///
    /// Fails with `InvalidArgument` when `lo > hi` or `hi` is out of bounds,
    /// and with `DepthExceeded` when the step ceiling is reached.
    fn search_window<T: SearchKey>(
        &self,
        dataset: &[T],
        lo: usize,
        hi: usize,
        target: T,
    ) -> Result<SearchResult, Error>;

    /// Searches the whole of `dataset` for `target`.
    ///
    /// Fails with `InvalidArgument` when `dataset` is empty.
    fn search<T: SearchKey>(&self, dataset: &[T], target: T) -> Result<SearchResult, Error> {
        if dataset.is_empty() {
            return Err(Error::invalid_argument("cannot search an empty dataset"));
        }
        self.search_window(dataset, 0, dataset.len() - 1, target)
    }
}

pub(crate) fn check_window(len: usize, lo: usize, hi: usize) -> Result<(), Error> {
    if lo > hi {
        return Err(Error::invalid_argument(format!(
            "window is empty: lo ({lo}) > hi ({hi})"
        )));
    }
    if hi >= len {
        return Err(Error::invalid_argument(format!(
            "window end {hi} is out of bounds for length {len}"
        )));
    }
    Ok(())
}

pub(crate) fn check_max_depth(max_depth: u32) -> Result<u32, Error> {
    if max_depth == 0 {
        Err(Error::invalid_argument("max_depth must be at least 1"))
    } else {
        Ok(max_depth)
    }
}

/// Step counter owned by a single search call.
pub(crate) struct DepthCounter {
    depth: u32,
    max_depth: u32,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Records one more step, failing once the ceiling would be passed.
    pub fn step(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::depth_exceeded(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn finish(self, outcome: Outcome) -> SearchResult {
        SearchResult {
            outcome,
            depth: self.depth,
        }
    }
}
