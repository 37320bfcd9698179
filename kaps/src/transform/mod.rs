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

//! Monotonic transforms approximating cumulative distribution functions.
//!
//! A [`Transform`] maps data values into a space where they are close to
//! uniformly spread, which is what makes interpolation accurate. The library
//! covers the families in [`Family`]: uniform (identity), normal,
//! exponential, lognormal, Pareto, Weibull, logistic, two Zipf proxies and
//! Box–Cox.
//!
//! Transforms are plain tagged data, so they also serve as descriptors: they
//! can be compared, hashed, printed, and encoded with
//! [`Transform::serialize`].
//!
//! Parameters can be given literally or estimated from a sample with the
//! adapters in [`fit`].
//!
//! # Usage
//!
//! ```rust
//! # use kaps::transform::{Family, Transform};
//! let literal = Transform::normal(0.0, 100.0).unwrap();
//! assert_eq!(literal.evaluate(0.0), 0.5);
//!
//! let sample = [1.0, 2.0, 4.0, 8.0, 16.0];
//! let fitted = Transform::fit(Family::LogNormal, &sample).unwrap();
//! assert_eq!(fitted.family(), Family::LogNormal);
//! ```

mod family;
pub mod fit;
mod function;
mod serialization;

pub use self::family::Family;
pub use self::function::Transform;
