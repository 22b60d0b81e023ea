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

use crate::config::Config;
use crate::error::Error;
use crate::handler::Handled;
use crate::resolver::resolve;
use std::io::{Read, Write};

/// Top-level entry point: encodes and decodes whole values.
///
/// A `Codec` holds only configuration; handlers come from the process-wide
/// registry, so any number of codecs can share them and a single codec can
/// be used from many threads at once.
///
/// # Examples
///
/// ```rust
/// use shapewire_core::Codec;
/// use std::collections::HashMap;
///
/// let codec = Codec::default();
/// let map = HashMap::from([(7u8, "seven".to_string())]);
/// let bytes = codec.to_bytes(&map).unwrap();
/// assert_eq!(bytes.len(), 4 + 1 + 4 + 5);
/// let decoded: HashMap<u8, String> = codec.from_bytes(&bytes).unwrap();
/// assert_eq!(decoded, map);
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use shapewire_core::Codec;
///
/// let codec = Codec::default()
///     .read_limit(64 * 1024)
///     .allow_trailing_bytes(true);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Codec {
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Codec { config }
    }

    /// Caps the bytes one decode may consume. Reads past the cap fail as
    /// truncated input.
    pub fn read_limit(mut self, limit: u64) -> Self {
        self.config.read_limit = Some(limit);
        self
    }

    /// Lets [`from_bytes`](Self::from_bytes) ignore input left after the value.
    pub fn allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.config.allow_trailing_bytes = allow;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes `value` to `writer`. On error the stream may hold a partial value.
    pub fn encode<T: Handled>(&self, writer: &mut dyn Write, value: &T) -> Result<(), Error> {
        resolve::<T>().write(writer, value)
    }

    pub fn decode<T: Handled>(&self, reader: &mut dyn Read) -> Result<T, Error> {
        let mut value = T::default();
        self.decode_into(reader, &mut value)?;
        Ok(value)
    }

    /// Decodes into an existing value. On error `dst` is partially updated
    /// and should be discarded.
    pub fn decode_into<T: Handled>(&self, reader: &mut dyn Read, dst: &mut T) -> Result<(), Error> {
        let handler = resolve::<T>();
        match self.config.read_limit {
            Some(limit) => handler.read(&mut reader.take(limit), dst),
            None => handler.read(reader, dst),
        }
    }

    /// Number of bytes [`encode`](Self::encode) would write for `value`.
    pub fn encoded_len<T: Handled>(&self, value: &T) -> Result<usize, Error> {
        resolve::<T>().v_length(value)
    }

    pub fn to_bytes<T: Handled>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let handler = resolve::<T>();
        let mut buf = Vec::with_capacity(handler.v_length(value)?);
        handler.write(&mut buf, value)?;
        Ok(buf)
    }

    pub fn from_bytes<T: Handled>(&self, bytes: &[u8]) -> Result<T, Error> {
        let mut reader = bytes;
        let value = self.decode(&mut reader)?;
        if !reader.is_empty() && !self.config.allow_trailing_bytes {
            return Err(Error::trailing_bytes(reader.len()));
        }
        Ok(value)
    }
}

/// Writes `value` with the default configuration.
pub fn write<T: Handled>(writer: &mut dyn Write, value: &T) -> Result<(), Error> {
    Codec::default().encode(writer, value)
}

/// Reads into `dst` with the default configuration.
pub fn read<T: Handled>(reader: &mut dyn Read, dst: &mut T) -> Result<(), Error> {
    Codec::default().decode_into(reader, dst)
}
