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

//! Big-endian primitives for the count and length prefixes.
//!
//! Handler payloads are written straight to the caller's stream; this module
//! only owns the framing shared by maps, lists and strings.

use crate::error::Error;
use crate::types::{MAX_DECLARED_SIZE, SIZE_OF_LEN};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Writes a 4-byte big-endian count, refusing anything the reader would reject.
pub fn write_len(writer: &mut dyn Write, what: &'static str, len: usize) -> Result<(), Error> {
    if len > MAX_DECLARED_SIZE as usize {
        return Err(Error::size_too_large(
            what,
            len as u64,
            MAX_DECLARED_SIZE as u64,
        ));
    }
    writer.write_u32::<BigEndian>(len as u32)?;
    Ok(())
}

/// Reads a 4-byte big-endian count and checks it against [`MAX_DECLARED_SIZE`].
///
/// Nothing past the prefix is consumed when the check fails.
pub fn read_len(reader: &mut dyn Read, what: &'static str) -> Result<usize, Error> {
    let declared = reader.read_u32::<BigEndian>()?;
    if declared > MAX_DECLARED_SIZE {
        return Err(Error::size_too_large(
            what,
            declared as u64,
            MAX_DECLARED_SIZE as u64,
        ));
    }
    Ok(declared as usize)
}

/// Bytes taken by a length prefix.
#[inline(always)]
pub const fn len_prefix_size() -> usize {
    SIZE_OF_LEN
}

/// Reads exactly `len` bytes without trusting `len` for the initial allocation.
pub fn read_bytes(reader: &mut dyn Read, len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::with_capacity(len.min(crate::types::PREALLOC_LIMIT));
    let read = Read::take(&mut *reader, len as u64).read_to_end(&mut buf)?;
    if read < len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, stream ended after {}", len, read),
        )
        .into());
    }
    Ok(buf)
}
