//! Types as first-class runtime values.
//!
//! A [`Type`] is a node in an immutable, freely shared type graph. Every node can
//! - test whether a JSON value conforms to it ([`TypeLike::accepts`]),
//! - test whether it is assignable where another type is expected ([`TypeLike::matches`]),
//! - degrade to the closest representable primitive shape ([`TypeLike::native_type`]),
//! - render its canonical signature (`Display`).
//!
//! Composite nodes additionally expose the sub-types they depend on ([`CompositeType::traverse`]),
//! and keyed-collection nodes expose their key and element types ([`CompositeTraversableType`]).
//!
//! The variant set is closed; capability checks are pattern matches on the variant tag
//! ([`Type::as_composite`], [`Type::as_traversable`]).
pub mod array;
pub mod array_key;
pub mod collection;
pub mod list;
pub mod non_empty_array;
pub mod scalar;
pub mod union;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::TypeError;

pub use array::ArrayType;
pub use array_key::ArrayKeyType;
pub use list::ListType;
pub use non_empty_array::NonEmptyArrayType;
pub use scalar::{LiteralType, ScalarType};
pub use union::UnionType;

/// Shared handle to a node of the type graph.
pub type TypeRef = Arc<Type>;

// ————————————————————————————————————————————————————————————————————————————
// CAPABILITIES
// ————————————————————————————————————————————————————————————————————————————

pub trait TypeLike: fmt::Display {
    /// Value-level conformance.
    fn accepts(&self, value: &Value) -> bool;
    /// Type-level assignability: is `self` usable wherever `other` is expected.
    fn matches(&self, other: &Type) -> bool;
    /// Closest primitive shape, used as a coercion-safe fallback.
    fn native_type(&self) -> TypeRef;
}

pub trait CompositeType: TypeLike {
    /// Sub-types this type structurally depends on, depth-first.
    fn traverse(&self) -> Vec<TypeRef>;
}

pub trait CompositeTraversableType: CompositeType {
    fn key_type(&self) -> ArrayKeyType;
    fn sub_type(&self) -> &TypeRef;
}

// ————————————————————————————————————————————————————————————————————————————
// THE GRAPH NODE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Top type: accepts and matches everything.
    Mixed,
    Scalar(ScalarType),
    Literal(LiteralType),
    ArrayKey(ArrayKeyType),
    Array(ArrayType),
    List(ListType),
    NonEmptyArray(NonEmptyArrayType),
    Union(UnionType),
}

static MIXED: Lazy<TypeRef> = Lazy::new(|| Arc::new(Type::Mixed));

impl Type {
    /// The process-wide `mixed` instance.
    pub fn mixed() -> TypeRef {
        MIXED.clone()
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Type::Mixed)
    }

    /// Builds a flattened union, see [`UnionType::new`].
    pub fn union(types: impl IntoIterator<Item = TypeRef>) -> Result<TypeRef, TypeError> {
        Ok(Arc::new(Type::Union(UnionType::new(types)?)))
    }

    pub fn as_composite(&self) -> Option<&dyn CompositeType> {
        match self {
            Type::Array(array) => Some(array),
            Type::List(list) => Some(list),
            Type::NonEmptyArray(array) => Some(array),
            Type::Union(union) => Some(union),
            Type::Mixed | Type::Scalar(_) | Type::Literal(_) | Type::ArrayKey(_) => None,
        }
    }

    pub fn as_traversable(&self) -> Option<&dyn CompositeTraversableType> {
        match self {
            Type::Array(array) => Some(array),
            Type::List(list) => Some(list),
            Type::NonEmptyArray(array) => Some(array),
            _ => None,
        }
    }

    /// Empty for non-composite types.
    pub fn traverse(&self) -> Vec<TypeRef> {
        self.as_composite()
            .map(|composite| composite.traverse())
            .unwrap_or_default()
    }
}

impl TypeLike for Type {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Type::Mixed => true,
            Type::Scalar(scalar) => scalar.accepts(value),
            Type::Literal(literal) => literal.accepts(value),
            Type::ArrayKey(key) => key.accepts(value),
            Type::Array(array) => array.accepts(value),
            Type::List(list) => list.accepts(value),
            Type::NonEmptyArray(array) => array.accepts(value),
            Type::Union(union) => union.accepts(value),
        }
    }

    fn matches(&self, other: &Type) -> bool {
        match self {
            Type::Mixed => true,
            Type::Scalar(scalar) => scalar.matches(other),
            Type::Literal(literal) => literal.matches(other),
            Type::ArrayKey(key) => key.matches(other),
            Type::Array(array) => array.matches(other),
            Type::List(list) => list.matches(other),
            Type::NonEmptyArray(array) => array.matches(other),
            Type::Union(union) => union.matches(other),
        }
    }

    fn native_type(&self) -> TypeRef {
        match self {
            Type::Mixed => Type::mixed(),
            Type::Scalar(scalar) => scalar.native_type(),
            Type::Literal(literal) => literal.native_type(),
            Type::ArrayKey(key) => key.native_type(),
            Type::Array(array) => array.native_type(),
            Type::List(list) => list.native_type(),
            Type::NonEmptyArray(array) => array.native_type(),
            Type::Union(union) => union.native_type(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Mixed => write!(f, "mixed"),
            Type::Scalar(scalar) => write!(f, "{scalar}"),
            Type::Literal(literal) => write!(f, "{literal}"),
            Type::ArrayKey(key) => write!(f, "{key}"),
            Type::Array(array) => write!(f, "{array}"),
            Type::List(list) => write!(f, "{list}"),
            Type::NonEmptyArray(array) => write!(f, "{array}"),
            Type::Union(union) => write!(f, "{union}"),
        }
    }
}

impl From<ScalarType> for Type {
    fn from(scalar: ScalarType) -> Self {
        Type::Scalar(scalar)
    }
}

impl From<LiteralType> for Type {
    fn from(literal: LiteralType) -> Self {
        Type::Literal(literal)
    }
}

impl From<ArrayKeyType> for Type {
    fn from(key: ArrayKeyType) -> Self {
        Type::ArrayKey(key)
    }
}

impl From<ArrayType> for Type {
    fn from(array: ArrayType) -> Self {
        Type::Array(array)
    }
}

impl From<ListType> for Type {
    fn from(list: ListType) -> Self {
        Type::List(list)
    }
}

impl From<NonEmptyArrayType> for Type {
    fn from(array: NonEmptyArrayType) -> Self {
        Type::NonEmptyArray(array)
    }
}

impl From<UnionType> for Type {
    fn from(union: UnionType) -> Self {
        Type::Union(union)
    }
}

/// Wraps a concrete type into a shared graph node.
pub trait IntoTypeRef {
    fn into_ref(self) -> TypeRef;
}

impl<T: Into<Type>> IntoTypeRef for T {
    fn into_ref(self) -> TypeRef {
        Arc::new(self.into())
    }
}

/// `[sub] ++ sub.traverse()`, shared by the keyed-collection types.
pub(crate) fn traverse_sub_type(sub_type: &TypeRef) -> Vec<TypeRef> {
    let mut out = vec![sub_type.clone()];
    if let Some(composite) = sub_type.as_composite() {
        out.extend(composite.traverse());
    }
    out
}

// ------------------------------- Tests ------------------------------------ //
