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

//! Error type shared by every handler.
//!
//! Errors are always created through the static constructor functions so the
//! `SHAPEWIRE_PANIC_ON_ERROR` debug switch can intercept them at the exact
//! creation site.

use std::borrow::Cow;

use thiserror::Error;

/// Set `SHAPEWIRE_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("SHAPEWIRE_PANIC_ON_ERROR").is_some();

/// Error type for encode and decode operations.
///
/// **DO NOT** construct variants directly, use the constructor functions:
///
/// ```rust
/// use shapewire_core::error::Error;
///
/// let err = Error::invalid_data("string payload is not valid UTF-8");
/// let err = Error::size_too_large("map", 0x8000_0000, 0x7fff_ffff);
/// ```
///
/// Stream failures convert through `?` and keep their [`std::io::ErrorKind`],
/// so truncated input surfaces as [`std::io::ErrorKind::UnexpectedEof`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Underlying stream failure, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A declared element count or byte length exceeds what the format allows.
    ///
    /// Do not construct this variant directly; use [`Error::size_too_large`] instead.
    #[error("transmitted {what} size too large ({declared}>{max})")]
    SizeTooLarge {
        what: &'static str,
        declared: u64,
        max: u64,
    },

    /// Malformed payload.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// Input left over after a complete value was decoded.
    ///
    /// Do not construct this variant directly; use [`Error::trailing_bytes`] instead.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),
}

impl Error {
    /// Creates a new [`Error::SizeTooLarge`].
    ///
    /// If `SHAPEWIRE_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn size_too_large(what: &'static str, declared: u64, max: u64) -> Self {
        let err = Error::SizeTooLarge {
            what,
            declared,
            max,
        };
        if PANIC_ON_ERROR {
            panic!("SHAPEWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`] from a string or static message.
    ///
    /// If `SHAPEWIRE_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("SHAPEWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TrailingBytes`] with the number of unread bytes.
    ///
    /// If `SHAPEWIRE_PANIC_ON_ERROR` is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn trailing_bytes(remaining: usize) -> Self {
        let err = Error::TrailingBytes(remaining);
        if PANIC_ON_ERROR {
            panic!("SHAPEWIRE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Returns the [`std::io::ErrorKind`] when this error came from the stream.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Error::Io(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Whether the decoder ran out of input before the value was complete.
    pub fn is_truncated(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::UnexpectedEof)
    }
}
