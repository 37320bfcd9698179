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

use super::DEFAULT_MAX_DEPTH;
use super::DepthCounter;
use super::Outcome;
use super::SearchKey;
use super::SearchResult;
use super::Searcher;
use super::check_max_depth;
use super::check_window;
use crate::error::Error;
use crate::transform::Transform;

/// K-ary predictive search engine.
///
/// Holds the fan-out `k`, the shrink divisor `d`, the transform `G` and a
/// depth ceiling. Each step:
///
/// 1. rejects targets outside `[data[lo], data[hi]]`;
/// 2. resolves single-element windows by equality;
/// 3. shrinks `k` to `max(1, k / d)` once the window spans no more than `k`
///    indices;
/// 4. interpolates the target in transformed space and picks one of `k`
///    equal index buckets;
/// 5. widens to a neighbouring range when the target lies outside the
///    bucket, or checks the bucket edges for a direct hit;
/// 6. continues in the new window, or scans it once no split is left.
///
/// See the [module documentation](super) for an example.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kaps {
    fanout: usize,
    divisor: usize,
    max_depth: u32,
    transform: Transform,
}

impl Kaps {
    /// Creates an engine with fan-out `fanout`, shrink divisor `divisor` and
    /// the given transform.
    ///
    /// Fails with `InvalidArgument` if `fanout` or `divisor` is zero.
    pub fn new(fanout: usize, divisor: usize, transform: Transform) -> Result<Self, Error> {
        if fanout == 0 {
            return Err(Error::invalid_argument("fanout must be at least 1"));
        }
        if divisor == 0 {
            return Err(Error::invalid_argument("divisor must be at least 1"));
        }
        Ok(Kaps {
            fanout,
            divisor,
            max_depth: DEFAULT_MAX_DEPTH,
            transform,
        })
    }

    /// Sets the depth ceiling. Fails with `InvalidArgument` if it is zero.
    pub fn with_max_depth(mut self, max_depth: u32) -> Result<Self, Error> {
        self.max_depth = check_max_depth(max_depth)?;
        Ok(self)
    }

    /// Returns the initial fan-out.
    pub fn fanout(&self) -> usize {
        self.fanout
    }

    /// Returns the shrink divisor.
    pub fn divisor(&self) -> usize {
        self.divisor
    }

    /// Returns the depth ceiling.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Returns the transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Searcher for Kaps {
    fn search_window<T: SearchKey>(
        &self,
        dataset: &[T],
        lo: usize,
        hi: usize,
        target: T,
    ) -> Result<SearchResult, Error> {
        check_window(dataset.len(), lo, hi)?;

        let mut depth = DepthCounter::new(self.max_depth);
        let mut lo = lo;
        let mut hi = hi;
        let mut k = self.fanout;
        loop {
            depth.step()?;

            let lo_value = dataset[lo];
            let hi_value = dataset[hi];
            // also rejects targets that do not compare, such as NaN
            if !(lo_value <= target && target <= hi_value) {
                return Ok(depth.finish(Outcome::NotFound));
            }
            if lo == hi {
                let outcome = if lo_value == target {
                    Outcome::Found(lo)
                } else {
                    Outcome::NotFound
                };
                return Ok(depth.finish(outcome));
            }

            let span = hi - lo;
            if span <= k {
                k = shrink_fanout(k, self.divisor, span);
            }

            let bucket = select_bucket(&self.transform, lo_value, hi_value, target, k);
            let (sub_lo, sub_hi) = bucket_bounds(lo, span, bucket, k);

            let (next_lo, next_hi) = if target < dataset[sub_lo] {
                (lo, sub_lo)
            } else if target > dataset[sub_hi] {
                (sub_hi, hi)
            } else {
                if dataset[sub_lo] == target {
                    return Ok(depth.finish(Outcome::Found(sub_lo)));
                }
                if dataset[sub_hi] == target {
                    return Ok(depth.finish(Outcome::Found(sub_hi)));
                }
                (sub_lo, sub_hi)
            };

            if next_hi - next_lo > 1 && k > 1 {
                lo = next_lo;
                hi = next_hi;
                continue;
            }

            let outcome = (next_lo..=next_hi)
                .find(|&i| dataset[i] == target)
                .map_or(Outcome::NotFound, Outcome::Found);
            return Ok(depth.finish(outcome));
        }
    }
}

/// Searches `dataset[lo..=hi]` for `target` with a one-off [`Kaps`] engine.
///
/// # Examples
///
/// ```
/// use kaps::search::{search, Outcome};
/// use kaps::transform::Transform;
///
/// let data = [10.0, 20.0, 30.0, 40.0, 50.0];
/// let result = search(&data, 0, 4, 25.0, 2, 2, Transform::uniform()).unwrap();
/// assert_eq!(result.outcome(), Outcome::NotFound);
/// ```
pub fn search<T: SearchKey>(
    dataset: &[T],
    lo: usize,
    hi: usize,
    target: T,
    fanout: usize,
    divisor: usize,
    transform: Transform,
) -> Result<SearchResult, Error> {
    Kaps::new(fanout, divisor, transform)?.search_window(dataset, lo, hi, target)
}

/// Reduces the fan-out for a window spanning `span <= k` indices.
///
/// With a divisor of 1 the division cannot make progress, so the fan-out is
/// capped at the span instead; otherwise a window narrower than `k` could be
/// revisited forever.
fn shrink_fanout(k: usize, divisor: usize, span: usize) -> usize {
    let shrunk = (k / divisor).max(1);
    if shrunk == k {
        k.min(span).max(1)
    } else {
        shrunk
    }
}

/// Interpolates `target` between the window ends in transformed space and
/// returns the bucket index in `[0, k)`.
fn select_bucket<T: SearchKey>(
    transform: &Transform,
    lo_value: T,
    hi_value: T,
    target: T,
    k: usize,
) -> usize {
    let mid = (k - 1) / 2;
    let ga = transform.evaluate(lo_value.as_f64());
    let gb = transform.evaluate(hi_value.as_f64());
    if gb == ga {
        return mid;
    }
    let gt = transform.evaluate(target.as_f64());
    let position = k as f64 * (gt - ga) / (gb - ga);
    if position.is_nan() {
        return mid;
    }

    let bucket = position.floor();
    if bucket <= 0.0 {
        0
    } else if bucket >= (k - 1) as f64 {
        k - 1
    } else {
        bucket as usize
    }
}

/// Maps bucket `b` of `k` to inclusive index bounds by an even split of the
/// window starting at `lo` and spanning `span` indices.
fn bucket_bounds(lo: usize, span: usize, bucket: usize, k: usize) -> (usize, usize) {
    let span = span as u128;
    let bucket = bucket as u128;
    let k = k as u128;
    let sub_lo = lo + (span * bucket / k) as usize;
    let sub_hi = lo + (span * (bucket + 1) / k) as usize;
    (sub_lo, sub_hi)
}
