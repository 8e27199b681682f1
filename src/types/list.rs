use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::collection::{self, entries_conform};
use super::{
    ArrayKeyType, ArrayType, CompositeTraversableType, CompositeType, Type, TypeLike, TypeRef,
    traverse_sub_type,
};

/// A collection keyed `0..n` in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListType {
    sub_type: TypeRef,
    signature: String,
}

static NATIVE: Lazy<TypeRef> = Lazy::new(|| {
    let mut list = ListType::new(Type::mixed());
    list.signature = "list".to_string();
    Arc::new(Type::List(list))
});

impl ListType {
    pub fn new(sub_type: TypeRef) -> Self {
        let signature = format!("list<{sub_type}>");
        Self { sub_type, signature }
    }

    pub fn native() -> TypeRef {
        NATIVE.clone()
    }
}

impl TypeLike for ListType {
    fn accepts(&self, value: &Value) -> bool {
        let (Some(keys), Some(entries)) = (collection::entries(value), collection::entries(value))
        else {
            return false;
        };
        collection::is_list(keys) && entries_conform(entries, ArrayKeyType::Int, &self.sub_type)
    }

    fn matches(&self, other: &Type) -> bool {
        match other {
            Type::Mixed => true,
            Type::Union(union) => union.is_matched_by(self),
            Type::List(list) => self.sub_type.matches(&list.sub_type),
            Type::Array(array) => {
                array.key_type().allows_int() && self.sub_type.matches(array.sub_type())
            }
            _ => false,
        }
    }

    fn native_type(&self) -> TypeRef {
        ArrayType::native()
    }
}

impl CompositeType for ListType {
    fn traverse(&self) -> Vec<TypeRef> {
        traverse_sub_type(&self.sub_type)
    }
}

impl CompositeTraversableType for ListType {
    fn key_type(&self) -> ArrayKeyType {
        ArrayKeyType::Int
    }

    fn sub_type(&self) -> &TypeRef {
        &self.sub_type
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}
