//! Primitive leaf types: native scalars and exact literal values.
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use serde_json::Value;

use super::{Type, TypeLike, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    Int,
    Float,
    String,
    Null,
}

static BOOL: Lazy<TypeRef> = Lazy::new(|| Arc::new(Type::Scalar(ScalarType::Bool)));
static INT: Lazy<TypeRef> = Lazy::new(|| Arc::new(Type::Scalar(ScalarType::Int)));
static FLOAT: Lazy<TypeRef> = Lazy::new(|| Arc::new(Type::Scalar(ScalarType::Float)));
static STRING: Lazy<TypeRef> = Lazy::new(|| Arc::new(Type::Scalar(ScalarType::String)));
static NULL: Lazy<TypeRef> = Lazy::new(|| Arc::new(Type::Scalar(ScalarType::Null)));

impl ScalarType {
    /// The shared graph node for this scalar.
    pub fn shared(self) -> TypeRef {
        match self {
            ScalarType::Bool => BOOL.clone(),
            ScalarType::Int => INT.clone(),
            ScalarType::Float => FLOAT.clone(),
            ScalarType::String => STRING.clone(),
            ScalarType::Null => NULL.clone(),
        }
    }

    pub fn is_int(self) -> bool {
        self == ScalarType::Int
    }

    pub fn is_string(self) -> bool {
        self == ScalarType::String
    }
}

impl TypeLike for ScalarType {
    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ScalarType::Bool, Value::Bool(_)) => true,
            (ScalarType::Int, Value::Number(number)) => number.is_i64(),
            (ScalarType::Float, Value::Number(number)) => number.is_f64(),
            (ScalarType::String, Value::String(_)) => true,
            (ScalarType::Null, Value::Null) => true,
            _ => false,
        }
    }

    fn matches(&self, other: &Type) -> bool {
        match other {
            Type::Mixed => true,
            Type::Union(union) => union.is_matched_by(self),
            Type::Scalar(scalar) => scalar == self,
            Type::ArrayKey(key) => match self {
                ScalarType::Int => key.allows_int(),
                ScalarType::String => key.allows_string(),
                _ => false,
            },
            _ => false,
        }
    }

    fn native_type(&self) -> TypeRef {
        self.shared()
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::Null => "null",
        };
        f.write_str(keyword)
    }
}

/// Exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralType {
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
}

impl LiteralType {
    /// `None` for null and for collections, which have no literal form.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(LiteralType::Bool(*b)),
            Value::Number(number) => match number.as_i64() {
                Some(int) => Some(LiteralType::Int(int)),
                None => number.as_f64().map(|float| LiteralType::Float(OrderedFloat(float))),
            },
            Value::String(s) => Some(LiteralType::String(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn scalar(&self) -> ScalarType {
        match self {
            LiteralType::Bool(_) => ScalarType::Bool,
            LiteralType::Int(_) => ScalarType::Int,
            LiteralType::Float(_) => ScalarType::Float,
            LiteralType::String(_) => ScalarType::String,
        }
    }
}

impl TypeLike for LiteralType {
    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (LiteralType::Bool(expected), Value::Bool(actual)) => expected == actual,
            (LiteralType::Int(expected), Value::Number(number)) => number.as_i64() == Some(*expected),
            (LiteralType::Float(expected), Value::Number(number)) => {
                number.is_f64() && number.as_f64() == Some(expected.0)
            }
            (LiteralType::String(expected), Value::String(actual)) => expected == actual,
            _ => false,
        }
    }

    fn matches(&self, other: &Type) -> bool {
        match other {
            Type::Mixed => true,
            Type::Union(union) => union.is_matched_by(self),
            Type::Literal(literal) => literal == self,
            Type::Scalar(scalar) => *scalar == self.scalar(),
            Type::ArrayKey(key) => match self {
                LiteralType::Int(_) => key.allows_int(),
                LiteralType::String(_) => key.allows_string(),
                _ => false,
            },
            _ => false,
        }
    }

    fn native_type(&self) -> TypeRef {
        self.scalar().shared()
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Bool(b) => write!(f, "{b}"),
            LiteralType::Int(int) => write!(f, "{int}"),
            // Debug keeps the fractional part, so `42.0` never renders like the int `42`.
            LiteralType::Float(float) => write!(f, "{:?}", float.0),
            LiteralType::String(s) => write!(f, "'{s}'"),
        }
    }
}
