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

//! The handler contract.
//!
//! Every type that can cross the wire has exactly one [`Handler`], built once
//! by the [`Registry`] from the type's [`Handled`] impl. A handler is either
//! fixed-size (constant length, operates on a pre-sized buffer slice) or
//! variable-size (value-dependent length, operates on a stream). Composite
//! handlers drive their element handlers through [`Handler::read`] and
//! [`Handler::write`], which accept either capability.

use crate::buffer::read_bytes;
use crate::error::Error;
use crate::resolver::Registry;
use crate::types::{Capability, INLINE_FIXED_LEN};
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

mod bool;
mod list;
pub mod map;
mod number;
pub mod pointer;
mod string;
pub mod struct_;

pub use list::ListHandler;
pub use map::{MapHandler, MapLike};
pub use pointer::{FixedPointer, Pointer, VariablePointer};
pub use string::StringHandler;
pub use struct_::StructBuilder;

/// Codec for a type whose encoding always has the same length.
pub trait FixedHandler<T>: Send + Sync + 'static {
    /// Byte length of every value of `T`.
    fn length(&self) -> usize;

    /// Decode from a buffer of exactly [`length`](Self::length) bytes.
    fn read_fixed(&self, buf: &[u8], dst: &mut T);

    /// Encode into a buffer of exactly [`length`](Self::length) bytes.
    fn write_fixed(&self, buf: &mut [u8], src: &T);
}

/// Codec for a self-delimiting type whose length depends on the value.
pub trait VariableHandler<T>: Send + Sync + 'static {
    /// Byte length of this particular value.
    fn v_length(&self, value: &T) -> Result<usize, Error>;

    fn read_variable(&self, reader: &mut dyn Read, dst: &mut T) -> Result<(), Error>;

    fn write_variable(&self, writer: &mut dyn Write, src: &T) -> Result<(), Error>;
}

/// The handler bound to one type.
pub enum Handler<T> {
    Fixed(Arc<dyn FixedHandler<T>>),
    Variable(Arc<dyn VariableHandler<T>>),
}

/// A type the registry knows how to build a handler for.
///
/// `Default` provides the zero value decode starts from.
pub trait Handled: Default + 'static {
    /// Builds the handler for `Self`, resolving component handlers through
    /// `registry`. Called at most once per registry unless a construction
    /// race occurs, in which case the duplicate is discarded.
    fn build_handler(registry: &Registry) -> Handler<Self>;
}

impl<T: 'static> Handler<T> {
    pub fn fixed<H: FixedHandler<T>>(handler: H) -> Self {
        Handler::Fixed(Arc::new(handler))
    }

    pub fn variable<H: VariableHandler<T>>(handler: H) -> Self {
        Handler::Variable(Arc::new(handler))
    }

    #[inline(always)]
    pub fn capability(&self) -> Capability {
        match self {
            Handler::Fixed(_) => Capability::Fixed,
            Handler::Variable(_) => Capability::Variable,
        }
    }

    #[inline(always)]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Handler::Fixed(_))
    }

    /// The constant length for fixed handlers, `None` for variable ones.
    #[inline(always)]
    pub fn fixed_length(&self) -> Option<usize> {
        match self {
            Handler::Fixed(handler) => Some(handler.length()),
            Handler::Variable(_) => None,
        }
    }

    /// Encoded length of `value` under either capability.
    #[inline]
    pub fn v_length(&self, value: &T) -> Result<usize, Error> {
        match self {
            Handler::Fixed(handler) => Ok(handler.length()),
            Handler::Variable(handler) => handler.v_length(value),
        }
    }

    /// Decode one value from the stream.
    ///
    /// Fixed handlers read exactly `length()` bytes into a staging buffer
    /// first, so truncated input fails before `dst` is touched.
    #[inline]
    pub fn read(&self, reader: &mut dyn Read, dst: &mut T) -> Result<(), Error> {
        match self {
            Handler::Fixed(handler) => read_fixed_from(handler.as_ref(), reader, dst),
            Handler::Variable(handler) => handler.read_variable(reader, dst),
        }
    }

    /// Encode one value to the stream.
    #[inline]
    pub fn write(&self, writer: &mut dyn Write, src: &T) -> Result<(), Error> {
        match self {
            Handler::Fixed(handler) => write_fixed_to(handler.as_ref(), writer, src),
            Handler::Variable(handler) => handler.write_variable(writer, src),
        }
    }
}

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        match self {
            Handler::Fixed(handler) => Handler::Fixed(Arc::clone(handler)),
            Handler::Variable(handler) => Handler::Variable(Arc::clone(handler)),
        }
    }
}

impl<T: 'static> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Fixed(handler) => f
                .debug_struct("Handler::Fixed")
                .field("length", &handler.length())
                .finish(),
            Handler::Variable(_) => f.write_str("Handler::Variable"),
        }
    }
}

fn read_fixed_from<T: 'static>(
    handler: &dyn FixedHandler<T>,
    reader: &mut dyn Read,
    dst: &mut T,
) -> Result<(), Error> {
    let len = handler.length();
    if len <= INLINE_FIXED_LEN {
        let mut buf = [0u8; INLINE_FIXED_LEN];
        reader.read_exact(&mut buf[..len])?;
        handler.read_fixed(&buf[..len], dst);
    } else {
        let buf = read_bytes(reader, len)?;
        handler.read_fixed(&buf, dst);
    }
    Ok(())
}

fn write_fixed_to<T: 'static>(
    handler: &dyn FixedHandler<T>,
    writer: &mut dyn Write,
    src: &T,
) -> Result<(), Error> {
    let len = handler.length();
    if len <= INLINE_FIXED_LEN {
        let mut buf = [0u8; INLINE_FIXED_LEN];
        handler.write_fixed(&mut buf[..len], src);
        writer.write_all(&buf[..len])?;
    } else {
        let mut buf = vec![0u8; len];
        handler.write_fixed(&mut buf, src);
        writer.write_all(&buf)?;
    }
    Ok(())
}
