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

//! Handlers for `Option<T>` and `Box<T>`.
//!
//! A pointer handler is transparent on the wire: no presence flag and no
//! extra bytes, just the pointee's own encoding. It mirrors the pointee
//! handler's capability, so `Option<u32>` is fixed with length 4 while
//! `Option<String>` is variable.
//!
//! Decoding allocates the pointee when the destination is absent and then
//! decodes into it. Encoding writes the pointee's current value; an absent
//! `Option` writes the pointee type's default value instead, since the
//! format has no way to express absence. `None` therefore decodes as
//! `Some(T::default())`.

use crate::error::Error;
use crate::handler::{FixedHandler, Handled, Handler, VariableHandler};
use crate::resolver::Registry;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::sync::Arc;

/// An optional or owning reference to a single pointee.
pub trait Pointer: Default + 'static {
    type Pointee: Handled;

    fn pointee(&self) -> Option<&Self::Pointee>;

    /// The pointee, allocating a default one first if absent.
    fn pointee_or_insert_default(&mut self) -> &mut Self::Pointee;
}

impl<T: Handled> Pointer for Option<T> {
    type Pointee = T;

    #[inline(always)]
    fn pointee(&self) -> Option<&T> {
        self.as_ref()
    }

    #[inline(always)]
    fn pointee_or_insert_default(&mut self) -> &mut T {
        self.get_or_insert_with(T::default)
    }
}

impl<T: Handled> Pointer for Box<T> {
    type Pointee = T;

    #[inline(always)]
    fn pointee(&self) -> Option<&T> {
        Some(self.as_ref())
    }

    #[inline(always)]
    fn pointee_or_insert_default(&mut self) -> &mut T {
        self.as_mut()
    }
}

pub struct FixedPointer<P: Pointer> {
    inner: Arc<dyn FixedHandler<P::Pointee>>,
    _pointer: PhantomData<fn() -> P>,
}

pub struct VariablePointer<P: Pointer> {
    inner: Arc<dyn VariableHandler<P::Pointee>>,
    _pointer: PhantomData<fn() -> P>,
}

impl<P: Pointer> FixedHandler<P> for FixedPointer<P> {
    #[inline(always)]
    fn length(&self) -> usize {
        self.inner.length()
    }

    fn read_fixed(&self, buf: &[u8], dst: &mut P) {
        self.inner.read_fixed(buf, dst.pointee_or_insert_default());
    }

    fn write_fixed(&self, buf: &mut [u8], src: &P) {
        match src.pointee() {
            Some(pointee) => self.inner.write_fixed(buf, pointee),
            None => self.inner.write_fixed(buf, &P::Pointee::default()),
        }
    }
}

impl<P: Pointer> VariableHandler<P> for VariablePointer<P> {
    fn v_length(&self, value: &P) -> Result<usize, Error> {
        match value.pointee() {
            Some(pointee) => self.inner.v_length(pointee),
            None => self.inner.v_length(&P::Pointee::default()),
        }
    }

    fn read_variable(&self, reader: &mut dyn Read, dst: &mut P) -> Result<(), Error> {
        self.inner.read_variable(reader, dst.pointee_or_insert_default())
    }

    fn write_variable(&self, writer: &mut dyn Write, src: &P) -> Result<(), Error> {
        match src.pointee() {
            Some(pointee) => self.inner.write_variable(writer, pointee),
            None => self.inner.write_variable(writer, &P::Pointee::default()),
        }
    }
}

/// Wraps the pointee's handler, keeping its capability.
pub fn build_pointer_handler<P: Pointer>(registry: &Registry) -> Handler<P> {
    match &*registry.resolve::<P::Pointee>() {
        Handler::Fixed(inner) => Handler::fixed(FixedPointer::<P> {
            inner: Arc::clone(inner),
            _pointer: PhantomData,
        }),
        Handler::Variable(inner) => Handler::variable(VariablePointer::<P> {
            inner: Arc::clone(inner),
            _pointer: PhantomData,
        }),
    }
}

impl<T: Handled> Handled for Option<T> {
    fn build_handler(registry: &Registry) -> Handler<Self> {
        build_pointer_handler::<Self>(registry)
    }
}

impl<T: Handled> Handled for Box<T> {
    fn build_handler(registry: &Registry) -> Handler<Self> {
        build_pointer_handler::<Self>(registry)
    }
}
