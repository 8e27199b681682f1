use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::collection::ArrayKey;
use super::{Type, TypeLike, TypeRef};

/// Restricts the keys of a keyed collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayKeyType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "string")]
    String,
    /// Either kind of key; the permissive default.
    #[default]
    #[serde(rename = "array-key")]
    IntOrString,
}

impl ArrayKeyType {
    pub fn allows_int(self) -> bool {
        matches!(self, ArrayKeyType::Int | ArrayKeyType::IntOrString)
    }

    pub fn allows_string(self) -> bool {
        matches!(self, ArrayKeyType::String | ArrayKeyType::IntOrString)
    }

    pub fn accepts_key(self, key: ArrayKey<'_>) -> bool {
        match key {
            ArrayKey::Int(_) => self.allows_int(),
            ArrayKey::String(_) => self.allows_string(),
        }
    }

    /// Every key `self` admits is also admitted by `other`.
    pub fn is_subset_of(self, other: ArrayKeyType) -> bool {
        (!self.allows_int() || other.allows_int()) && (!self.allows_string() || other.allows_string())
    }
}

impl TypeLike for ArrayKeyType {
    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Number(number) => number.is_i64() && self.allows_int(),
            Value::String(_) => self.allows_string(),
            _ => false,
        }
    }

    fn matches(&self, other: &Type) -> bool {
        match other {
            Type::Mixed => true,
            Type::Union(union) => union.is_matched_by(self),
            Type::ArrayKey(key) => self.is_subset_of(*key),
            Type::Scalar(scalar) => match self {
                ArrayKeyType::Int => scalar.is_int(),
                ArrayKeyType::String => scalar.is_string(),
                ArrayKeyType::IntOrString => false,
            },
            _ => false,
        }
    }

    fn native_type(&self) -> TypeRef {
        Arc::new(Type::ArrayKey(*self))
    }
}

impl fmt::Display for ArrayKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKeyType::Int => write!(f, "int"),
            ArrayKeyType::String => write!(f, "string"),
            ArrayKeyType::IntOrString => write!(f, "array-key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;
    use serde_json::json;

    #[test]
    fn default_is_int_or_string() {
        assert_eq!(ArrayKeyType::default(), ArrayKeyType::IntOrString);
        assert_eq!(ArrayKeyType::default().to_string(), "array-key");
    }

    #[test]
    fn keys_are_checked_against_their_kind() {
        assert!(ArrayKeyType::Int.accepts_key(ArrayKey::Int(3)));
        assert!(!ArrayKeyType::Int.accepts_key(ArrayKey::String("foo")));
        assert!(ArrayKeyType::String.accepts_key(ArrayKey::String("foo")));
        assert!(!ArrayKeyType::String.accepts_key(ArrayKey::Int(0)));
        assert!(ArrayKeyType::IntOrString.accepts_key(ArrayKey::Int(0)));
        assert!(ArrayKeyType::IntOrString.accepts_key(ArrayKey::String("foo")));
    }

    #[test]
    fn accepts_values_usable_as_keys() {
        assert!(ArrayKeyType::Int.accepts(&json!(42)));
        assert!(!ArrayKeyType::Int.accepts(&json!(4.2)));
        assert!(ArrayKeyType::String.accepts(&json!("foo")));
        assert!(ArrayKeyType::default().accepts(&json!("foo")));
        assert!(!ArrayKeyType::default().accepts(&json!(null)));
    }

    #[test]
    fn matches_is_subset() {
        use ArrayKeyType::*;
        assert!(Int.matches(&Type::ArrayKey(Int)));
        assert!(Int.matches(&Type::ArrayKey(IntOrString)));
        assert!(String.matches(&Type::ArrayKey(IntOrString)));
        assert!(IntOrString.matches(&Type::ArrayKey(IntOrString)));
        assert!(!IntOrString.matches(&Type::ArrayKey(Int)));
        assert!(!Int.matches(&Type::ArrayKey(String)));
    }

    #[test]
    fn single_kind_keys_match_their_scalar() {
        assert!(ArrayKeyType::Int.matches(&ScalarType::Int.into()));
        assert!(ArrayKeyType::String.matches(&ScalarType::String.into()));
        assert!(!ArrayKeyType::IntOrString.matches(&ScalarType::Int.into()));
        assert!(!ArrayKeyType::Int.matches(&ScalarType::Float.into()));
    }
}
