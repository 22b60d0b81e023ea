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

use crate::buffer::{len_prefix_size, read_bytes, read_len, write_len};
use crate::error::Error;
use crate::handler::{Handled, Handler, VariableHandler};
use crate::resolver::Registry;
use std::io::{Read, Write};

/// `[u32 byte length][UTF-8 bytes]`.
pub struct StringHandler;

impl VariableHandler<String> for StringHandler {
    #[inline]
    fn v_length(&self, value: &String) -> Result<usize, Error> {
        Ok(len_prefix_size() + value.len())
    }

    fn read_variable(&self, reader: &mut dyn Read, dst: &mut String) -> Result<(), Error> {
        let len = read_len(reader, "string")?;
        let bytes = read_bytes(reader, len)?;
        *dst = String::from_utf8(bytes).map_err(|e| {
            Error::invalid_data(format!("string payload is not valid UTF-8: {}", e))
        })?;
        Ok(())
    }

    fn write_variable(&self, writer: &mut dyn Write, src: &String) -> Result<(), Error> {
        write_len(writer, "string", src.len())?;
        writer.write_all(src.as_bytes())?;
        Ok(())
    }
}

impl Handled for String {
    fn build_handler(_: &Registry) -> Handler<Self> {
        Handler::variable(StringHandler)
    }
}
