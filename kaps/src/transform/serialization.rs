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

//! Binary encoding of transform descriptors.
//!
//! Layout (little-endian):
//!
//! | offset | size | field                     |
//! |--------|------|---------------------------|
//! | 0      | 1    | serial version            |
//! | 1      | 1    | family id                 |
//! | 2      | 1    | parameter count (= arity) |
//! | 3      | 8·n  | parameters as f64         |

use super::Family;
use super::Transform;
use crate::codec::DescriptorBytes;
use crate::codec::DescriptorSlice;
use crate::error::Error;

pub(crate) const SERIAL_VERSION: u8 = 1;
pub(crate) const HEADER_BYTES: usize = 3;

impl Transform {
    /// Serializes this descriptor to bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaps::transform::Transform;
    ///
    /// let g = Transform::lognormal(0.0, 1.5).unwrap();
    /// let bytes = g.serialize();
    /// assert_eq!(bytes.len(), 3 + 2 * 8);
    /// assert_eq!(Transform::deserialize(&bytes).unwrap(), g);
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        let params = self.params();
        let mut bytes = DescriptorBytes::with_capacity(HEADER_BYTES + params.len() * 8);
        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(self.family().id());
        bytes.write_u8(params.len() as u8);
        for &param in params {
            bytes.write_f64_le(param);
        }
        bytes.into_bytes()
    }

    /// Deserializes a descriptor previously produced by [`Transform::serialize`].
    ///
    /// Fails with `MalformedData` when the bytes are truncated, carry an
    /// unknown version or family, or have trailing data, and with
    /// `InvalidParameter` when a decoded parameter is outside its domain.
    pub fn deserialize(bytes: &[u8]) -> Result<Transform, Error> {
        let mut cursor = DescriptorSlice::new(bytes);

        let serial_version = cursor
            .read_u8()
            .map_err(Error::insufficient_data("serial_version"))?;
        let family_id = cursor
            .read_u8()
            .map_err(Error::insufficient_data("family_id"))?;
        let num_params = cursor
            .read_u8()
            .map_err(Error::insufficient_data("num_params"))?;

        if serial_version != SERIAL_VERSION {
            return Err(Error::malformed(format!(
                "unsupported serial version: expected {SERIAL_VERSION}, got {serial_version}"
            )));
        }
        let family = Family::from_id(family_id)
            .ok_or_else(|| Error::malformed(format!("unknown family id: {family_id}")))?;
        if num_params as usize != family.arity() {
            return Err(Error::malformed(format!(
                "{family} takes {} parameters, header says {num_params}",
                family.arity()
            )));
        }

        let mut params = Vec::with_capacity(family.arity());
        for _ in 0..family.arity() {
            let param = cursor
                .read_f64_le()
                .map_err(Error::insufficient_data("param"))?;
            params.push(param);
        }
        if cursor.remaining() != 0 {
            return Err(Error::malformed(format!(
                "{} trailing bytes after descriptor",
                cursor.remaining()
            )));
        }

        Transform::from_parts(family, &params)
    }
}
