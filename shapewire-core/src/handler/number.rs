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

use crate::handler::{FixedHandler, Handled, Handler};
use crate::resolver::Registry;
use byteorder::{BigEndian, ByteOrder};
use std::mem;

macro_rules! impl_num_handler {
    ($ty:ty, $handler:ident, $reader:expr, $writer:expr) => {
        pub struct $handler;

        impl FixedHandler<$ty> for $handler {
            #[inline(always)]
            fn length(&self) -> usize {
                mem::size_of::<$ty>()
            }

            #[inline(always)]
            fn read_fixed(&self, buf: &[u8], dst: &mut $ty) {
                *dst = $reader(buf);
            }

            #[inline(always)]
            fn write_fixed(&self, buf: &mut [u8], src: &$ty) {
                $writer(buf, *src);
            }
        }

        impl Handled for $ty {
            fn build_handler(_: &Registry) -> Handler<Self> {
                Handler::fixed($handler)
            }
        }
    };
}

impl_num_handler!(u8, U8Handler, |buf: &[u8]| buf[0], |buf: &mut [u8], v: u8| buf[0] = v);
impl_num_handler!(i8, I8Handler, |buf: &[u8]| buf[0] as i8, |buf: &mut [u8], v: i8| {
    buf[0] = v as u8
});
impl_num_handler!(u16, U16Handler, BigEndian::read_u16, BigEndian::write_u16);
impl_num_handler!(i16, I16Handler, BigEndian::read_i16, BigEndian::write_i16);
impl_num_handler!(u32, U32Handler, BigEndian::read_u32, BigEndian::write_u32);
impl_num_handler!(i32, I32Handler, BigEndian::read_i32, BigEndian::write_i32);
impl_num_handler!(u64, U64Handler, BigEndian::read_u64, BigEndian::write_u64);
impl_num_handler!(i64, I64Handler, BigEndian::read_i64, BigEndian::write_i64);
impl_num_handler!(f32, F32Handler, BigEndian::read_f32, BigEndian::write_f32);
impl_num_handler!(f64, F64Handler, BigEndian::read_f64, BigEndian::write_f64);
