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

//! Handlers for plain structs.
//!
//! A struct encodes as the concatenation of its fields in declaration order.
//! Each field is registered with a pair of accessors, which turns the field's
//! own handler into a handler for the whole struct that only touches that
//! field. When every field is fixed-size the struct is fixed-size too and is
//! read and written through one buffer; otherwise it is variable-size.
//!
//! Most structs are declared with [`handled_struct!`](crate::handled_struct).

use crate::error::Error;
use crate::handler::{FixedHandler, Handled, Handler, VariableHandler};
use crate::resolver::Registry;
use std::any::type_name;
use std::io::{Read, Write};
use std::ops::Range;
use std::sync::Arc;

pub type Getter<S, F> = fn(&S) -> &F;
pub type GetterMut<S, F> = fn(&mut S) -> &mut F;

struct FixedField<S, F> {
    inner: Arc<dyn FixedHandler<F>>,
    get: Getter<S, F>,
    get_mut: GetterMut<S, F>,
}

impl<S: 'static, F: 'static> FixedHandler<S> for FixedField<S, F> {
    #[inline(always)]
    fn length(&self) -> usize {
        self.inner.length()
    }

    #[inline(always)]
    fn read_fixed(&self, buf: &[u8], dst: &mut S) {
        self.inner.read_fixed(buf, (self.get_mut)(dst));
    }

    #[inline(always)]
    fn write_fixed(&self, buf: &mut [u8], src: &S) {
        self.inner.write_fixed(buf, (self.get)(src));
    }
}

struct VariableField<S, F> {
    inner: Arc<dyn VariableHandler<F>>,
    get: Getter<S, F>,
    get_mut: GetterMut<S, F>,
}

impl<S: 'static, F: 'static> VariableHandler<S> for VariableField<S, F> {
    fn v_length(&self, value: &S) -> Result<usize, Error> {
        self.inner.v_length((self.get)(value))
    }

    fn read_variable(&self, reader: &mut dyn Read, dst: &mut S) -> Result<(), Error> {
        self.inner.read_variable(reader, (self.get_mut)(dst))
    }

    fn write_variable(&self, writer: &mut dyn Write, src: &S) -> Result<(), Error> {
        self.inner.write_variable(writer, (self.get)(src))
    }
}

/// Struct whose fields are all fixed-size.
pub struct FixedStruct<S> {
    fields: Vec<(Range<usize>, Arc<dyn FixedHandler<S>>)>,
    length: usize,
}

impl<S: 'static> FixedHandler<S> for FixedStruct<S> {
    #[inline(always)]
    fn length(&self) -> usize {
        self.length
    }

    fn read_fixed(&self, buf: &[u8], dst: &mut S) {
        for (range, field) in &self.fields {
            field.read_fixed(&buf[range.clone()], dst);
        }
    }

    fn write_fixed(&self, buf: &mut [u8], src: &S) {
        for (range, field) in &self.fields {
            field.write_fixed(&mut buf[range.clone()], src);
        }
    }
}

/// Struct with at least one variable-size field.
pub struct VariableStruct<S> {
    fields: Vec<Handler<S>>,
}

impl<S: 'static> VariableHandler<S> for VariableStruct<S> {
    fn v_length(&self, value: &S) -> Result<usize, Error> {
        let mut total = 0;
        for field in &self.fields {
            total += field.v_length(value)?;
        }
        Ok(total)
    }

    fn read_variable(&self, reader: &mut dyn Read, dst: &mut S) -> Result<(), Error> {
        for field in &self.fields {
            field.read(reader, dst)?;
        }
        Ok(())
    }

    fn write_variable(&self, writer: &mut dyn Write, src: &S) -> Result<(), Error> {
        for field in &self.fields {
            field.write(writer, src)?;
        }
        Ok(())
    }
}

/// Collects field handlers for a struct in declaration order.
///
/// ```rust
/// use shapewire_core::handler::{Handled, Handler, StructBuilder};
/// use shapewire_core::resolver::Registry;
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Handled for Point {
///     fn build_handler(registry: &Registry) -> Handler<Self> {
///         StructBuilder::<Self>::new(registry)
///             .field::<i32>("x", |p| &p.x, |p| &mut p.x)
///             .field::<i32>("y", |p| &p.y, |p| &mut p.y)
///             .build()
///     }
/// }
///
/// assert_eq!(Registry::new().resolve::<Point>().fixed_length(), Some(8));
/// ```
pub struct StructBuilder<'r, S> {
    registry: &'r Registry,
    fields: Vec<(&'static str, Handler<S>)>,
}

impl<'r, S: 'static> StructBuilder<'r, S> {
    pub fn new(registry: &'r Registry) -> Self {
        StructBuilder {
            registry,
            fields: Vec::new(),
        }
    }

    pub fn field<F: Handled>(
        mut self,
        name: &'static str,
        get: Getter<S, F>,
        get_mut: GetterMut<S, F>,
    ) -> Self {
        let projected = match &*self.registry.resolve::<F>() {
            Handler::Fixed(inner) => Handler::fixed(FixedField {
                inner: Arc::clone(inner),
                get,
                get_mut,
            }),
            Handler::Variable(inner) => Handler::variable(VariableField {
                inner: Arc::clone(inner),
                get,
                get_mut,
            }),
        };
        self.fields.push((name, projected));
        self
    }

    pub fn build(self) -> Handler<S> {
        let fixed: Option<Vec<Arc<dyn FixedHandler<S>>>> = self
            .fields
            .iter()
            .map(|(_, field)| match field {
                Handler::Fixed(field) => Some(Arc::clone(field)),
                Handler::Variable(_) => None,
            })
            .collect();

        match fixed {
            Some(fixed) => {
                let mut offset = 0;
                let fields = fixed
                    .into_iter()
                    .map(|field| {
                        let start = offset;
                        offset += field.length();
                        (start..offset, field)
                    })
                    .collect();
                log::debug!(
                    "{} is fixed-size: {} bytes over {} fields",
                    type_name::<S>(),
                    offset,
                    self.fields.len()
                );
                Handler::fixed(FixedStruct {
                    fields,
                    length: offset,
                })
            }
            None => {
                if log::log_enabled!(log::Level::Debug) {
                    let variable: Vec<&str> = self
                        .fields
                        .iter()
                        .filter(|(_, field)| !field.is_fixed())
                        .map(|(name, _)| *name)
                        .collect();
                    log::debug!(
                        "{} is variable-size because of fields {:?}",
                        type_name::<S>(),
                        variable
                    );
                }
                Handler::variable(VariableStruct {
                    fields: self.fields.into_iter().map(|(_, field)| field).collect(),
                })
            }
        }
    }
}

/// Implements [`Handled`] for plain structs by listing their fields.
///
/// Fields are encoded in the order they are listed, which should match
/// declaration order. The struct must implement [`Default`].
///
/// ```rust
/// use shapewire_core::handled_struct;
/// use shapewire_core::resolver::Registry;
/// use std::collections::HashMap;
///
/// #[derive(Default)]
/// struct Inventory {
///     owner: String,
///     counts: HashMap<u8, u32>,
/// }
///
/// #[derive(Default)]
/// struct Tag {
///     id: u16,
/// }
///
/// handled_struct! {
///     Inventory { owner: String, counts: HashMap<u8, u32> }
///     Tag { id: u16 }
/// }
///
/// let registry = Registry::new();
/// assert!(!registry.resolve::<Inventory>().is_fixed());
/// assert_eq!(registry.resolve::<Tag>().fixed_length(), Some(2));
/// ```
#[macro_export]
macro_rules! handled_struct {
    ($($name:ident { $($field:ident : $ty:ty),* $(,)? })+) => {
        $(
            impl $crate::handler::Handled for $name {
                fn build_handler(
                    registry: &$crate::resolver::Registry,
                ) -> $crate::handler::Handler<Self> {
                    $crate::handler::StructBuilder::<Self>::new(registry)
                        $(.field::<$ty>(stringify!($field), |s| &s.$field, |s| &mut s.$field))*
                        .build()
                }
            }
        )+
    };
}
