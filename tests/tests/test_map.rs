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

use shapewire::{Codec, Error, Handled};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasherDefault;
use std::io::{self, Read};

fn round_trip<T: Handled>(value: &T) -> T {
    let codec = Codec::default();
    let bytes = codec.to_bytes(value).unwrap();
    assert_eq!(codec.encoded_len(value).unwrap(), bytes.len());
    codec.from_bytes(&bytes).expect("deserialize")
}

#[test]
fn test_hashmap_string() {
    let mut map = HashMap::new();
    map.insert("key1".to_string(), "value1".to_string());
    map.insert("key2".to_string(), "value2".to_string());
    assert_eq!(map, round_trip(&map));
}

#[test]
fn test_btreemap_string() {
    let mut map = BTreeMap::new();
    map.insert("key1".to_string(), "value1".to_string());
    map.insert("key2".to_string(), "value2".to_string());
    assert_eq!(map, round_trip(&map));
}

#[test]
fn test_map_fixture_bytes() {
    let map: HashMap<u8, String> =
        HashMap::from([(7, "seven".to_string()), (8, "eight".to_string())]);
    let bytes = Codec::default().to_bytes(&map).unwrap();
    let expected = hex::decode(concat!(
        "00000002",
        "07",
        "00000005",
        "736576656e",
        "08",
        "00000005",
        "6569676874"
    ))
    .unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(round_trip(&map), map);
}

#[test]
fn test_empty_map() {
    let codec = Codec::default();
    let bytes = codec.to_bytes(&HashMap::<u32, String>::new()).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    let decoded: HashMap<u32, String> = codec.from_bytes(&[0, 0, 0, 0]).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_map_round_trip_many_sizes() {
    // xorshift keeps the contents varied without a randomness dependency
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    for size in [0usize, 1, 2, 17, 255, 1000] {
        let map: HashMap<u64, Vec<i16>> = (0..size)
            .map(|_| {
                let key = next();
                let len = (next() % 5) as usize;
                (key, (0..len).map(|_| next() as i16).collect())
            })
            .collect();
        let decoded = round_trip(&map);
        assert_eq!(decoded.len(), map.len());
        for (key, value) in &map {
            assert_eq!(decoded.get(key), Some(value));
        }
    }
}

#[test]
fn test_hash_and_btree_maps_share_wire_format() {
    let hash: HashMap<i32, bool> = (0..50).map(|i| (i - 25, i % 3 == 0)).collect();
    let btree: BTreeMap<i32, bool> = hash.iter().map(|(k, v)| (*k, *v)).collect();
    let codec = Codec::default();
    let from_hash = codec.to_bytes(&hash).unwrap();
    let from_btree = codec.to_bytes(&btree).unwrap();
    // both are written in encoded-key order, which differs from `Ord` for negative keys
    assert_eq!(from_hash, from_btree);
    let decoded: BTreeMap<i32, bool> = codec.from_bytes(&from_hash).unwrap();
    assert_eq!(decoded, btree);
}

#[test]
fn test_custom_hasher() {
    type Seeded = BuildHasherDefault<std::collections::hash_map::DefaultHasher>;
    let mut map: HashMap<u16, String, Seeded> = HashMap::default();
    map.insert(1, "one".to_string());
    map.insert(2, "two".to_string());
    assert_eq!(round_trip(&map), map);
}

#[test]
fn test_nested_maps() {
    let mut inner = BTreeMap::new();
    inner.insert(1u8, vec!["a".to_string(), "b".to_string()]);
    inner.insert(2u8, vec![]);
    let mut outer = HashMap::new();
    outer.insert("first".to_string(), inner.clone());
    outer.insert("second".to_string(), BTreeMap::new());
    outer.insert(String::new(), inner);
    assert_eq!(round_trip(&outer), outer);
}

#[test]
fn test_map_with_optional_values() {
    let map: BTreeMap<u8, Option<Box<String>>> = BTreeMap::from([
        (1, Some(Box::new("present".to_string()))),
        (2, None),
    ]);
    let decoded = round_trip(&map);
    assert_eq!(decoded[&1], Some(Box::new("present".to_string())));
    // absent pointees travel as their default value
    assert_eq!(decoded[&2], Some(Box::new(String::new())));
}

struct CountingReader<'a> {
    data: &'a [u8],
    calls: usize,
}

impl Read for CountingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        self.data.read(buf)
    }
}

#[test]
fn test_oversized_map_count() {
    let mut payload = vec![0x80, 0x00, 0x00, 0x00];
    payload.extend_from_slice(&[0x07, 0, 0, 0, 5]);
    let mut reader = CountingReader {
        data: &payload,
        calls: 0,
    };
    let err = Codec::default()
        .decode::<HashMap<u8, String>>(&mut reader)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::SizeTooLarge {
            what: "map",
            declared: 0x8000_0000,
            max: 0x7FFF_FFFF,
        }
    ));
    assert_eq!(
        err.to_string(),
        "transmitted map size too large (2147483648>2147483647)"
    );
    assert_eq!(reader.calls, 1);
    assert_eq!(reader.data.len(), 5);
}

#[test]
fn test_truncated_map() {
    let codec = Codec::default();
    let map: BTreeMap<u32, u32> = (0..4).map(|i| (i, i * 10)).collect();
    let bytes = codec.to_bytes(&map).unwrap();
    for cut in 0..bytes.len() {
        let err = codec
            .from_bytes::<BTreeMap<u32, u32>>(&bytes[..cut])
            .unwrap_err();
        assert!(err.is_truncated(), "cut at {cut}: {err}");
    }
}

#[test]
fn test_nested_value_error_propagates() {
    // one entry whose string value is not UTF-8
    let bytes = [0, 0, 0, 1, 3, 0, 0, 0, 1, 0xFF];
    let err = Codec::default()
        .from_bytes::<HashMap<u8, String>>(&bytes)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}
