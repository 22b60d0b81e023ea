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

//! Handler for key→value mappings.
//!
//! Wire layout: `[u32 entry count][key][value]*`, big-endian count, no type
//! tags. Key and value types are fixed by the surrounding type, so the
//! payload describes nothing beyond its cardinality.
//!
//! Entries are written in ascending order of their encoded key bytes, which
//! makes the output of a given map reproducible regardless of the
//! container's own iteration order. Readers accept entries in any order.

use crate::buffer::{len_prefix_size, read_len, write_len};
use crate::error::Error;
use crate::handler::{Handled, Handler, VariableHandler};
use crate::resolver::Registry;
use crate::types::PREALLOC_LIMIT;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::sync::Arc;

/// A container the map handler can encode and rebuild.
pub trait MapLike: Default + 'static {
    type Key: Handled;
    type Value: Handled;

    fn entry_count(&self) -> usize;

    fn entries<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a Self::Key, &'a Self::Value)> + 'a>;

    /// An empty container, pre-sized where the container supports it.
    fn with_capacity_hint(capacity: usize) -> Self;

    /// Inserts an entry, replacing any previous value for an equal key.
    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);
}

impl<K, V, S> MapLike for HashMap<K, V, S>
where
    K: Handled + Eq + Hash,
    V: Handled,
    S: BuildHasher + Default + 'static,
{
    type Key = K;
    type Value = V;

    #[inline(always)]
    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a> {
        Box::new(self.iter())
    }

    fn with_capacity_hint(capacity: usize) -> Self {
        HashMap::with_capacity_and_hasher(capacity, S::default())
    }

    #[inline(always)]
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K, V> MapLike for BTreeMap<K, V>
where
    K: Handled + Ord,
    V: Handled,
{
    type Key = K;
    type Value = V;

    #[inline(always)]
    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a> {
        Box::new(self.iter())
    }

    fn with_capacity_hint(_: usize) -> Self {
        BTreeMap::new()
    }

    #[inline(always)]
    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Variable-size handler for any [`MapLike`] container.
///
/// The key and value handlers are resolved once, when the map handler is
/// built, and shared for the handler's lifetime.
pub struct MapHandler<M: MapLike> {
    key: Arc<Handler<M::Key>>,
    value: Arc<Handler<M::Value>>,
    _map: PhantomData<fn() -> M>,
}

impl<M: MapLike> MapHandler<M> {
    pub fn new(registry: &Registry) -> Self {
        MapHandler {
            key: registry.resolve::<M::Key>(),
            value: registry.resolve::<M::Value>(),
            _map: PhantomData,
        }
    }

    pub fn key_handler(&self) -> &Arc<Handler<M::Key>> {
        &self.key
    }

    pub fn value_handler(&self) -> &Arc<Handler<M::Value>> {
        &self.value
    }
}

impl<M: MapLike> VariableHandler<M> for MapHandler<M> {
    fn v_length(&self, value: &M) -> Result<usize, Error> {
        let mut total = len_prefix_size();
        for (k, v) in value.entries() {
            total += self.key.v_length(k)?;
            total += self.value.v_length(v)?;
        }
        Ok(total)
    }

    /// Binds a fresh container to `dst`, then decodes `count` entries into it.
    ///
    /// On error `dst` holds the entries decoded so far and must be discarded.
    fn read_variable(&self, reader: &mut dyn Read, dst: &mut M) -> Result<(), Error> {
        let count = read_len(reader, "map")?;
        *dst = M::with_capacity_hint(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            let mut key = M::Key::default();
            self.key.read(reader, &mut key)?;
            let mut value = M::Value::default();
            self.value.read(reader, &mut value)?;
            dst.insert_entry(key, value);
        }
        Ok(())
    }

    fn write_variable(&self, writer: &mut dyn Write, src: &M) -> Result<(), Error> {
        let count = src.entry_count();
        write_len(writer, "map", count)?;
        if count == 0 {
            return Ok(());
        }

        let key_capacity = self.key.fixed_length().unwrap_or(0);
        let mut entries = Vec::with_capacity(count);
        for (key, value) in src.entries() {
            let mut key_bytes = Vec::with_capacity(key_capacity);
            self.key.write(&mut key_bytes, key)?;
            entries.push((key_bytes, value));
        }
        // equal encodings come from equal keys, so the unstable sort is deterministic
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        for (key_bytes, value) in entries {
            writer.write_all(&key_bytes)?;
            self.value.write(writer, value)?;
        }
        Ok(())
    }
}

impl<K, V, S> Handled for HashMap<K, V, S>
where
    K: Handled + Eq + Hash,
    V: Handled,
    S: BuildHasher + Default + 'static,
{
    fn build_handler(registry: &Registry) -> Handler<Self> {
        Handler::variable(MapHandler::<Self>::new(registry))
    }
}

impl<K, V> Handled for BTreeMap<K, V>
where
    K: Handled + Ord,
    V: Handled,
{
    fn build_handler(registry: &Registry) -> Handler<Self> {
        Handler::variable(MapHandler::<Self>::new(registry))
    }
}
