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

use crate::buffer::{len_prefix_size, read_len, write_len};
use crate::error::Error;
use crate::handler::{Handled, Handler, VariableHandler};
use crate::resolver::Registry;
use crate::types::PREALLOC_LIMIT;
use std::io::{Read, Write};
use std::sync::Arc;

/// `[u32 element count][element]*`.
///
/// Fixed-size elements are packed into one buffer and written with a single
/// `write_all`.
pub struct ListHandler<T> {
    element: Arc<Handler<T>>,
}

impl<T: Handled> ListHandler<T> {
    pub fn new(registry: &Registry) -> Self {
        ListHandler {
            element: registry.resolve::<T>(),
        }
    }
}

impl<T: Handled> VariableHandler<Vec<T>> for ListHandler<T> {
    fn v_length(&self, value: &Vec<T>) -> Result<usize, Error> {
        match &*self.element {
            Handler::Fixed(element) => Ok(len_prefix_size() + element.length() * value.len()),
            Handler::Variable(element) => {
                let mut total = len_prefix_size();
                for item in value {
                    total += element.v_length(item)?;
                }
                Ok(total)
            }
        }
    }

    fn read_variable(&self, reader: &mut dyn Read, dst: &mut Vec<T>) -> Result<(), Error> {
        let count = read_len(reader, "list")?;
        *dst = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            let mut item = T::default();
            self.element.read(reader, &mut item)?;
            dst.push(item);
        }
        Ok(())
    }

    fn write_variable(&self, writer: &mut dyn Write, src: &Vec<T>) -> Result<(), Error> {
        write_len(writer, "list", src.len())?;
        match &*self.element {
            Handler::Fixed(element) => {
                let len = element.length();
                if len == 0 || src.is_empty() {
                    return Ok(());
                }
                let mut buf = vec![0u8; len * src.len()];
                for (chunk, item) in buf.chunks_exact_mut(len).zip(src) {
                    element.write_fixed(chunk, item);
                }
                writer.write_all(&buf)?;
            }
            Handler::Variable(element) => {
                for item in src {
                    element.write_variable(writer, item)?;
                }
            }
        }
        Ok(())
    }
}

impl<T: Handled> Handled for Vec<T> {
    fn build_handler(registry: &Registry) -> Handler<Self> {
        Handler::variable(ListHandler::<T>::new(registry))
    }
}
