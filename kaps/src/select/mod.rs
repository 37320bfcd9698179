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

//! Distribution selection (L-KAPS).
//!
//! A [`Selector`] learns which transform makes a dataset most
//! interpolation-friendly. It derives probe targets from a [`ProbeBattery`],
//! runs [`Kaps`](crate::search::Kaps) for every descriptor in a [`Catalog`],
//! every probe and every fan-out, and sums the depths per descriptor. The
//! descriptor with the smallest total wins; on exact ties the one that comes
//! first in the catalog wins.
//!
//! Selection is evaluation-heavy by design. The intended use is to select
//! once per dataset and reuse the winning transform for many queries.
//!
//! With the `rayon` feature enabled, descriptors are scored in parallel; the
//! selected descriptor is the same as in the sequential path.
//!
//! # Usage
//!
//! ```rust
//! # use kaps::select::{Catalog, Selector};
//! # use kaps::search::{Outcome, Searcher};
//! # use kaps::transform::Transform;
//! let data: Vec<f64> = (1..=1000).map(|i| (i as f64).powi(3)).collect();
//!
//! let mut catalog = Catalog::new();
//! catalog.push(Transform::uniform());
//! catalog.push(Transform::box_cox(1.0 / 3.0).unwrap());
//!
//! let selection = Selector::new().select(&data, &catalog).unwrap();
//! assert_eq!(selection.best().to_string(), "box_cox(beta=0.3333333333333333)");
//!
//! let engine = selection.engine(8, 2).unwrap();
//! let result = engine.search(&data, 125_000.0).unwrap();
//! assert_eq!(result.outcome(), Outcome::Found(49));
//! ```

mod catalog;
mod probe;
mod selector;

pub use self::catalog::Catalog;
pub use self::probe::ProbeBattery;
pub use self::selector::ScoreTable;
pub use self::selector::Selection;
pub use self::selector::Selector;
pub use self::selector::select;

/// Default shrink divisor used while scoring descriptors.
pub const DEFAULT_DIVISOR: usize = 2;

/// Default fan-out values every probe is searched with.
pub const DEFAULT_FANOUTS: [usize; 6] = [2, 4, 8, 16, 32, 64];

/// Default probe positions, as percentiles of the dataset.
pub const DEFAULT_PERCENTILES: [f64; 32] = [
    0.1, 0.3, 0.5, 0.7, 0.9, 1.3, 1.8, 2.5, 3.5, 5.0, 7.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0,
    50.0, 60.0, 70.0, 75.0, 80.0, 85.0, 90.0, 92.0, 95.0, 97.0, 98.0, 99.0, 99.5, 99.8, 99.9,
];
