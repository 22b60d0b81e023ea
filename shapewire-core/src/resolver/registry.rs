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

use crate::handler::{Handled, Handler};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock};

type CachedHandler = Arc<dyn Any + Send + Sync>;

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Resolves the handler for `T` from the process-wide registry.
///
/// Every call for the same `T` returns the same instance:
///
/// ```rust
/// use shapewire_core::resolver::resolve;
/// use std::sync::Arc;
///
/// let a = resolve::<Vec<u32>>();
/// let b = resolve::<Vec<u32>>();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub fn resolve<T: Handled>() -> Arc<Handler<T>> {
    GLOBAL_REGISTRY.get_or_init(Registry::new).resolve::<T>()
}

/// Memoizing cache from Rust type to its handler.
///
/// Handlers are built lazily on first resolution. Building a composite
/// handler resolves its component handlers through the same registry, so no
/// lock is held while a handler is under construction. When two threads race
/// on the same type the first stored handler wins and the other is dropped.
pub struct Registry {
    handlers: DashMap<TypeId, CachedHandler>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            handlers: DashMap::new(),
        }
    }

    pub fn resolve<T: Handled>(&self) -> Arc<Handler<T>> {
        let key = TypeId::of::<T>();
        // Clone out of the guard before building: construction re-enters `resolve`.
        let cached = self.handlers.get(&key).map(|entry| Arc::clone(entry.value()));
        if let Some(handler) = cached {
            return downcast::<T>(handler);
        }

        let handler = T::build_handler(self);
        let capability = handler.capability();
        let built: CachedHandler = Arc::new(handler);
        let stored = match self.handlers.entry(key) {
            Entry::Occupied(existing) => {
                log::trace!(
                    "discarding duplicate handler for {}, another thread stored one first",
                    type_name::<T>()
                );
                Arc::clone(existing.get())
            }
            Entry::Vacant(slot) => {
                let stored = Arc::clone(slot.insert(built).value());
                log::debug!(
                    "built {} handler for {}",
                    capability.as_str(),
                    type_name::<T>()
                );
                stored
            }
        };
        downcast::<T>(stored)
    }

    /// Whether a handler for `T` has already been built.
    pub fn contains<T: Handled>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drops every cached handler.
    ///
    /// Handlers already handed out stay valid; the next resolution of a type
    /// builds a fresh instance.
    pub fn clear(&self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

fn downcast<T: Handled>(handler: CachedHandler) -> Arc<Handler<T>> {
    match handler.downcast::<Handler<T>>() {
        Ok(handler) => handler,
        Err(_) => unreachable!(
            "handler cached under the TypeId of {} has a different type",
            type_name::<T>()
        ),
    }
}
