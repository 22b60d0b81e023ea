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

/// One byte, `0` or `1`; any nonzero byte decodes as `true`.
pub struct BoolHandler;

impl FixedHandler<bool> for BoolHandler {
    #[inline(always)]
    fn length(&self) -> usize {
        1
    }

    #[inline(always)]
    fn read_fixed(&self, buf: &[u8], dst: &mut bool) {
        *dst = buf[0] != 0;
    }

    #[inline(always)]
    fn write_fixed(&self, buf: &mut [u8], src: &bool) {
        buf[0] = *src as u8;
    }
}

impl Handled for bool {
    fn build_handler(_: &Registry) -> Handler<Self> {
        Handler::fixed(BoolHandler)
    }
}
