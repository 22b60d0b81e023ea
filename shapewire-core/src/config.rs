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

/// Configuration for a [`Codec`](crate::codec::Codec).
///
/// Handlers themselves are stateless and shared process-wide; these options
/// only govern how the entry points drive them.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of bytes a single decode may consume from its stream.
    /// `None` leaves the stream unbounded.
    pub read_limit: Option<u64>,
    /// Whether `from_bytes` accepts input that continues past the decoded value.
    pub allow_trailing_bytes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            read_limit: None,
            allow_trailing_bytes: false,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn read_limit(&self) -> Option<u64> {
        self.read_limit
    }

    #[inline(always)]
    pub fn is_allow_trailing_bytes(&self) -> bool {
        self.allow_trailing_bytes
    }
}
