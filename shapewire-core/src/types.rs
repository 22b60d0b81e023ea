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

/// Width in bytes of every count and length prefix on the wire.
pub const SIZE_OF_LEN: usize = 4;

/// Largest count or byte length a prefix may declare.
pub const MAX_DECLARED_SIZE: u32 = i32::MAX as u32;

/// Upper bound on elements reserved up front from a declared count.
///
/// Collections grow past this as entries actually arrive, so a forged
/// count can only cost as much memory as the bytes behind it.
pub const PREALLOC_LIMIT: usize = 4096;

/// Fixed values up to this length are staged on the stack when they are
/// moved between a buffer and a stream.
pub const INLINE_FIXED_LEN: usize = 32;

/// The two mutually exclusive handler shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Constant byte length, in-place buffer access.
    Fixed,
    /// Value-dependent length, stream access.
    Variable,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Fixed => "fixed",
            Capability::Variable => "variable",
        }
    }
}
