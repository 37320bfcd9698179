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

//! K-ary predictive search (KAPS) over sorted numeric data, with learned
//! distribution transforms (L-KAPS).
//!
//! * [`transform`]: monotonic CDF approximations (uniform, normal,
//!   exponential, lognormal, Pareto, Weibull, logistic, Zipf proxies,
//!   Box–Cox) and closed-form parameter estimators.
//! * [`search`]: the KAPS engine plus binary and interpolation search
//!   baselines, all reporting how many steps a search took.
//! * [`select`]: picks the transform that minimizes total search depth over
//!   a battery of probe targets.
//!
//! # Usage
//!
//! ```rust
//! use kaps::search::{Outcome, Searcher};
//! use kaps::select::{Catalog, Selector};
//!
//! let data: Vec<f64> = (1..=2000).map(|i| (i as f64).ln()).collect();
//!
//! let selection = Selector::new()
//!     .select(&data, &Catalog::default_grid())
//!     .unwrap();
//! let engine = selection.engine(16, 2).unwrap();
//!
//! let result = engine.search(&data, data[1234]).unwrap();
//! assert_eq!(result.outcome(), Outcome::Found(1234));
//! ```

mod codec;

pub mod error;
pub mod search;
pub mod select;
pub mod transform;
