//! Keyed-collection view over JSON values.
//!
//! Arrays contribute `(index, element)` entries; objects contribute `(key, element)`
//! entries in insertion order, where a key spelled as a canonical `i64` counts as an
//! int key.
use std::iter::Enumerate;
use std::slice;

use serde_json::{Value, map};

use super::{ArrayKeyType, Type, TypeLike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKey<'a> {
    Int(i64),
    String(&'a str),
}

impl<'a> ArrayKey<'a> {
    fn from_object_key(key: &'a str) -> Self {
        match key.parse::<i64>() {
            Ok(int) if int.to_string() == key => ArrayKey::Int(int),
            _ => ArrayKey::String(key),
        }
    }
}

pub enum Entries<'a> {
    Array(Enumerate<slice::Iter<'a, Value>>),
    Object(map::Iter<'a>),
}

impl<'a> Iterator for Entries<'a> {
    type Item = (ArrayKey<'a>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Array(items) => items
                .next()
                .map(|(index, item)| (ArrayKey::Int(index as i64), item)),
            Entries::Object(fields) => fields
                .next()
                .map(|(key, item)| (ArrayKey::from_object_key(key), item)),
        }
    }
}

/// `None` when the value is not a keyed collection.
pub fn entries(value: &Value) -> Option<Entries<'_>> {
    match value {
        Value::Array(items) => Some(Entries::Array(items.iter().enumerate())),
        Value::Object(fields) => Some(Entries::Object(fields.iter())),
        _ => None,
    }
}

/// Short-circuits on the first entry whose key or element is rejected.
pub fn entries_conform<'a>(
    entries: impl Iterator<Item = (ArrayKey<'a>, &'a Value)>,
    key_type: ArrayKeyType,
    sub_type: &Type,
) -> bool {
    for (key, item) in entries {
        if !key_type.accepts_key(key) {
            return false;
        }
        if !sub_type.accepts(item) {
            return false;
        }
    }
    true
}

/// Keys are exactly `0, 1, 2, ...` in iteration order.
pub fn is_list(entries: Entries<'_>) -> bool {
    entries
        .enumerate()
        .all(|(position, (key, _))| key == ArrayKey::Int(position as i64))
}

/// `keyword<sub>` for the default key type, `keyword<key, sub>` otherwise.
pub(crate) fn signature(keyword: &str, key_type: ArrayKeyType, sub_type: &Type) -> String {
    if key_type == ArrayKeyType::default() {
        format!("{keyword}<{sub_type}>")
    } else {
        format!("{keyword}<{key_type}, {sub_type}>")
    }
}
