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

//! # Shapewire Core
//!
//! A schema-free binary codec: the shape of a Rust type decides its wire
//! layout. Nothing about the type is written to the stream, so both peers
//! must agree on the type being exchanged.
//!
//! ## Architecture
//!
//! - **`resolver`**: the memoizing [`Registry`] that builds one handler per
//!   type on first use and hands out the same instance afterwards
//! - **`handler`**: the handler contract and the built-in handlers for
//!   numbers, `bool`, `String`, `Vec<T>`, maps, `Option<T>`/`Box<T>` and
//!   structs declared with [`handled_struct!`]
//! - **`codec`**: the [`Codec`] entry point and its [`Config`]
//! - **`buffer`**: big-endian count and length prefixes
//! - **`error`**: the [`Error`] type
//!
//! ## Handlers
//!
//! Every handler is either **fixed-size** (constant length, encoded into a
//! pre-sized buffer) or **variable-size** (self-delimiting, streamed).
//! Composite handlers resolve their element handlers once when they are
//! built and dispatch to whichever capability each element exposes.
//!
//! ## Wire format
//!
//! All integers are big-endian. Maps, lists and strings carry a 4-byte
//! count or length prefix bounded by `0x7FFFFFFF`; structs are the
//! concatenation of their fields; `Option` and `Box` add no bytes.
//!
//! ```rust
//! use shapewire_core::{handled_struct, Codec};
//! use std::collections::HashMap;
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Order {
//!     id: u32,
//!     lines: HashMap<u8, String>,
//! }
//!
//! handled_struct! {
//!     Order { id: u32, lines: HashMap<u8, String> }
//! }
//!
//! let codec = Codec::default();
//! let order = Order { id: 1, lines: HashMap::from([(7, "seven".to_string())]) };
//! let bytes = codec.to_bytes(&order).unwrap();
//! assert_eq!(codec.from_bytes::<Order>(&bytes).unwrap(), order);
//! ```

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod resolver;
pub mod types;

pub use crate::codec::Codec;
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::handler::{FixedHandler, Handled, Handler, VariableHandler};
pub use crate::resolver::{resolve, Registry};
pub use crate::types::Capability;
