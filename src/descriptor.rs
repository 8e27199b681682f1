//! JSON type descriptors.
//!
//! Tooling describes a type graph as tagged JSON rather than as a type string:
//!
//! ```json
//! {"type": "non-empty-array", "key": "string", "item": {"type": "union", "members": [
//!     {"type": "int"}, {"type": "literal", "value": "foo"}
//! ]}}
//! ```
//!
//! A descriptor is only a recipe; [`TypeDescriptor::build`] goes through the regular
//! constructors, so the same invariants (union flattening, no `mixed` member) hold.
use serde::Deserialize;
use serde_json::Value;

use crate::error::DescriptorError;
use crate::path_de;
use crate::types::{
    ArrayKeyType, ArrayType, IntoTypeRef, ListType, LiteralType, NonEmptyArrayType, ScalarType,
    Type, TypeRef,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TypeDescriptor {
    Mixed,
    Bool,
    Int,
    Float,
    String,
    Null,
    Literal {
        value: Value,
    },
    ArrayKey {
        #[serde(default)]
        key: ArrayKeyType,
    },
    /// Without `key` and `item`, the shared native `array`.
    Array {
        key: Option<ArrayKeyType>,
        item: Option<Box<TypeDescriptor>>,
    },
    List {
        item: Option<Box<TypeDescriptor>>,
    },
    NonEmptyArray {
        key: Option<ArrayKeyType>,
        item: Option<Box<TypeDescriptor>>,
    },
    Union {
        members: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn build(&self) -> Result<TypeRef, DescriptorError> {
        let ty = match self {
            TypeDescriptor::Mixed => Type::mixed(),
            TypeDescriptor::Bool => ScalarType::Bool.shared(),
            TypeDescriptor::Int => ScalarType::Int.shared(),
            TypeDescriptor::Float => ScalarType::Float.shared(),
            TypeDescriptor::String => ScalarType::String.shared(),
            TypeDescriptor::Null => ScalarType::Null.shared(),
            TypeDescriptor::Literal { value } => LiteralType::from_value(value)
                .ok_or_else(|| DescriptorError::UnsupportedLiteral(value.clone()))?
                .into_ref(),
            TypeDescriptor::ArrayKey { key } => (*key).into_ref(),
            TypeDescriptor::Array { key: None, item: None } => ArrayType::native(),
            TypeDescriptor::Array { key, item } => {
                ArrayType::new(key.unwrap_or_default(), build_item(item)?).into_ref()
            }
            TypeDescriptor::List { item: None } => ListType::native(),
            TypeDescriptor::List { item: Some(item) } => ListType::new(item.build()?).into_ref(),
            TypeDescriptor::NonEmptyArray { key: None, item: None } => NonEmptyArrayType::native(),
            TypeDescriptor::NonEmptyArray { key, item } => {
                NonEmptyArrayType::new(key.unwrap_or_default(), build_item(item)?).into_ref()
            }
            TypeDescriptor::Union { members } => {
                if members.is_empty() {
                    return Err(DescriptorError::EmptyUnion);
                }
                let members = members
                    .iter()
                    .map(TypeDescriptor::build)
                    .collect::<Result<Vec<_>, _>>()?;
                Type::union(members)?
            }
        };
        Ok(ty)
    }
}

fn build_item(item: &Option<Box<TypeDescriptor>>) -> Result<TypeRef, DescriptorError> {
    match item {
        Some(item) => item.build(),
        None => Ok(Type::mixed()),
    }
}

/// Decode a descriptor document and build its type graph.
pub fn load_str(src: &str) -> Result<TypeRef, DescriptorError> {
    path_de::from_str_with_path::<TypeDescriptor>(src)?.build()
}

pub fn load_value(value: Value) -> Result<TypeRef, DescriptorError> {
    path_de::from_value_with_path::<TypeDescriptor>(value)?.build()
}
