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

use shapewire::{handled_struct, resolve, Codec, Registry};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Barrier};
use std::thread;

type Scores = HashMap<String, Option<Box<u32>>>;

fn build_scores() -> Scores {
    (0..32)
        .map(|i| (format!("player{i}"), (i % 3 != 0).then(|| Box::new(i * 10))))
        .collect()
}

#[test]
fn test_map_bytes_agree_across_threads() {
    let codec = Arc::new(Codec::default());
    // every thread builds its own HashMap, each with a differently seeded hasher
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || codec.to_bytes(&build_scores()).unwrap())
        })
        .collect();
    let encoded: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for bytes in &encoded[1..] {
        assert_eq!(bytes, &encoded[0]);
    }

    let handles: Vec<_> = encoded
        .into_iter()
        .map(|bytes| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || codec.from_bytes::<Scores>(&bytes).unwrap())
        })
        .collect();
    let expected: Scores = build_scores()
        .into_iter()
        .map(|(name, score)| (name, Some(score.unwrap_or_default())))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[derive(Default, Debug, PartialEq, Eq, Hash, Clone)]
struct Item {
    id: i32,
    tags: BTreeMap<String, u8>,
}

handled_struct! {
    Item { id: i32, tags: BTreeMap<String, u8> }
}

#[test]
fn test_struct_multi_thread() {
    let codec = Arc::new(Codec::default());
    let src: Vec<Item> = (0..8)
        .map(|i| Item {
            id: i,
            tags: (0..i).map(|t| (format!("tag{t}"), t as u8)).collect(),
        })
        .collect();
    let handles: Vec<_> = src
        .iter()
        .cloned()
        .map(|item| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || {
                let bytes = codec.to_bytes(&item).unwrap();
                codec.from_bytes::<Item>(&bytes).unwrap()
            })
        })
        .collect();
    let dest: Vec<Item> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(dest, src);
}

type Contended = BTreeMap<u32, Vec<Option<Box<String>>>>;

#[test]
fn test_concurrent_first_resolution() {
    let threads = 12;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                resolve::<Contended>()
            })
        })
        .collect();
    let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for handler in &resolved {
        assert!(Arc::ptr_eq(handler, &resolved[0]));
    }
    assert!(Arc::ptr_eq(&resolved[0], &resolve::<Contended>()));
}

#[test]
fn test_isolated_registry_concurrent_resolution() {
    let registry = Arc::new(Registry::new());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.resolve::<Item>()
            })
        })
        .collect();
    let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for handler in &resolved {
        assert!(Arc::ptr_eq(handler, &resolved[0]));
    }
    // Item, i32, BTreeMap<String, u8>, String, u8
    assert_eq!(registry.len(), 5);
    assert!(!Arc::ptr_eq(&resolved[0], &resolve::<Item>()));
}
