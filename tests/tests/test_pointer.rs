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

//! `Option<T>` and `Box<T>` encode the pointee's current value and add no
//! bytes of their own. An absent `Option` is written as the pointee's default
//! value, so it always decodes as present.

use shapewire::{handled_struct, resolve, Capability, Codec};
use std::collections::HashMap;

#[derive(Default, Debug, PartialEq, Clone)]
struct Account {
    id: u64,
    owner: String,
}

#[derive(Default, Debug, PartialEq)]
struct Profile {
    account: Option<Box<Account>>,
    nickname: Option<String>,
    limit: Box<u32>,
}

handled_struct! {
    Account { id: u64, owner: String }
    Profile {
        account: Option<Box<Account>>,
        nickname: Option<String>,
        limit: Box<u32>,
    }
}

#[test]
fn test_present_pointee_round_trips() {
    let codec = Codec::default();
    let value = Some(Box::new(Account {
        id: 42,
        owner: "ada".to_string(),
    }));
    let bytes = codec.to_bytes(&value).unwrap();
    let decoded: Option<Box<Account>> = codec.from_bytes(&bytes).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_encoding_does_not_touch_source() {
    let codec = Codec::default();
    let value = Some(Box::new(7u16));
    let before = value.clone();
    codec.to_bytes(&value).unwrap();
    assert_eq!(value, before);
}

#[test]
fn test_pointer_is_transparent_on_wire() {
    let codec = Codec::default();
    let account = Account {
        id: 1,
        owner: "grace".to_string(),
    };
    let plain = codec.to_bytes(&account).unwrap();
    let boxed = codec.to_bytes(&Box::new(account.clone())).unwrap();
    let optional = codec.to_bytes(&Some(Box::new(account))).unwrap();
    assert_eq!(plain, boxed);
    assert_eq!(plain, optional);
}

#[test]
fn test_absent_pointee_decodes_as_default() {
    let codec = Codec::default();
    let bytes = codec.to_bytes(&None::<Box<Account>>).unwrap();
    assert_eq!(bytes, codec.to_bytes(&Account::default()).unwrap());
    let decoded: Option<Box<Account>> = codec.from_bytes(&bytes).unwrap();
    assert_eq!(decoded, Some(Box::new(Account::default())));
}

#[test]
fn test_pointer_capability_follows_pointee() {
    assert_eq!(resolve::<Option<Box<u64>>>().capability(), Capability::Fixed);
    assert_eq!(resolve::<Option<Box<u64>>>().fixed_length(), Some(8));
    assert_eq!(
        resolve::<Option<Box<Account>>>().capability(),
        Capability::Variable
    );
    assert_eq!(
        resolve::<Box<HashMap<u8, u8>>>().capability(),
        Capability::Variable
    );
}

#[test]
fn test_struct_with_pointer_fields() {
    let codec = Codec::default();
    let profile = Profile {
        account: Some(Box::new(Account {
            id: 9,
            owner: "linus".to_string(),
        })),
        nickname: Some("penguin".to_string()),
        limit: Box::new(500),
    };
    let bytes = codec.to_bytes(&profile).unwrap();
    assert_eq!(codec.from_bytes::<Profile>(&bytes).unwrap(), profile);

    let sparse = Profile::default();
    let decoded: Profile = codec
        .from_bytes(&codec.to_bytes(&sparse).unwrap())
        .unwrap();
    assert_eq!(decoded.account, Some(Box::default()));
    assert_eq!(decoded.nickname, Some(String::new()));
    assert_eq!(*decoded.limit, 0);
}

#[test]
fn test_decode_into_allocates_missing_pointee() {
    let codec = Codec::default();
    let bytes = codec.to_bytes(&0x01020304u32).unwrap();
    let mut dst: Option<Box<u32>> = None;
    codec.decode_into(&mut bytes.as_slice(), &mut dst).unwrap();
    assert_eq!(dst, Some(Box::new(0x01020304)));
}
