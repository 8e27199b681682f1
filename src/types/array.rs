use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::collection::{self, entries_conform};
use super::{
    ArrayKeyType, CompositeTraversableType, CompositeType, Type, TypeLike, TypeRef,
    traverse_sub_type,
};

/// A possibly-empty keyed collection; the native shape of every stricter collection type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    key_type: ArrayKeyType,
    sub_type: TypeRef,
    signature: String,
}

static NATIVE: Lazy<TypeRef> = Lazy::new(|| {
    let mut array = ArrayType::new(ArrayKeyType::default(), Type::mixed());
    array.signature = "array".to_string();
    Arc::new(Type::Array(array))
});

impl ArrayType {
    pub fn new(key_type: ArrayKeyType, sub_type: TypeRef) -> Self {
        let signature = collection::signature("array", key_type, &sub_type);
        Self { key_type, sub_type, signature }
    }

    /// Shared `array` (`array-key` keys, `mixed` elements).
    pub fn native() -> TypeRef {
        NATIVE.clone()
    }
}

impl TypeLike for ArrayType {
    fn accepts(&self, value: &Value) -> bool {
        collection::entries(value)
            .is_some_and(|entries| entries_conform(entries, self.key_type, &self.sub_type))
    }

    fn matches(&self, other: &Type) -> bool {
        match other {
            Type::Mixed => true,
            Type::Union(union) => union.is_matched_by(self),
            Type::Array(array) => {
                self.key_type.is_subset_of(array.key_type) && self.sub_type.matches(&array.sub_type)
            }
            _ => false,
        }
    }

    fn native_type(&self) -> TypeRef {
        ArrayType::native()
    }
}

impl CompositeType for ArrayType {
    fn traverse(&self) -> Vec<TypeRef> {
        traverse_sub_type(&self.sub_type)
    }
}

impl CompositeTraversableType for ArrayType {
    fn key_type(&self) -> ArrayKeyType {
        self.key_type
    }

    fn sub_type(&self) -> &TypeRef {
        &self.sub_type
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}
