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

//! # Shapewire
//!
//! Shapewire encodes Rust values to a compact big-endian byte stream without a
//! schema: the value's type decides the layout, and decoding rebuilds the
//! value from the same type.
//!
//! ## Key Features
//!
//! - **No schema**: numbers, strings, lists, maps, `Option`/`Box` and structs
//!   are supported directly
//! - **Fixed-size fast path**: types whose encoding has a constant length are
//!   packed through a single buffer
//! - **Shared handlers**: one handler per type, built once and reused from any
//!   thread
//! - **Reproducible maps**: map entries are written in a stable order
//!
//! ```rust
//! use shapewire::{handled_struct, Codec, Error};
//! use std::collections::HashMap;
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u8,
//!     address: Address,
//!     hobbies: Vec<String>,
//!     metadata: HashMap<String, String>,
//!     manager: Option<Box<String>>,
//! }
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Address {
//!     street: String,
//!     city: String,
//! }
//!
//! handled_struct! {
//!     Person {
//!         name: String,
//!         age: u8,
//!         address: Address,
//!         hobbies: Vec<String>,
//!         metadata: HashMap<String, String>,
//!         manager: Option<Box<String>>,
//!     }
//!     Address { street: String, city: String }
//! }
//!
//! # fn main() -> Result<(), Error> {
//! let person = Person {
//!     name: "John Doe".to_string(),
//!     age: 30,
//!     address: Address {
//!         street: "123 Main St".to_string(),
//!         city: "New York".to_string(),
//!     },
//!     hobbies: vec!["reading".to_string(), "coding".to_string()],
//!     metadata: HashMap::from([
//!         ("department".to_string(), "engineering".to_string()),
//!         ("level".to_string(), "senior".to_string()),
//!     ]),
//!     manager: Some(Box::new("Jane Roe".to_string())),
//! };
//!
//! let codec = Codec::default();
//! let bytes = codec.to_bytes(&person)?;
//! let decoded: Person = codec.from_bytes(&bytes)?;
//! assert_eq!(person, decoded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Streams
//!
//! [`write`] and [`read`] work directly on any `std::io::Write` /
//! `std::io::Read`; truncated input surfaces as an I/O error of kind
//! `UnexpectedEof`.

pub use shapewire_core::{
    codec::{read, write},
    error::Error,
    handled_struct,
    handler::{FixedHandler, Handled, Handler, MapLike, Pointer, StructBuilder, VariableHandler},
    resolver::{resolve, Registry},
    types::Capability,
    Codec, Config,
};
