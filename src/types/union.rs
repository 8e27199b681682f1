//! Sum types.
//!
//! Members are flattened at construction: a member that is itself a union is spliced
//! in place, so a union never directly contains another union. `mixed` is rejected as
//! a member. Duplicates are kept as given.
//!
//! Matching is a double dispatch. A union matching some other type asks its members;
//! any other type matching a union asks the union through [`UnionType::is_matched_by`],
//! which is also how union-vs-union matching reduces to single-type checks.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::{CompositeType, Type, TypeLike, TypeRef};
use crate::error::TypeError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionType {
    types: Vec<TypeRef>,
}

impl UnionType {
    pub fn new(types: impl IntoIterator<Item = TypeRef>) -> Result<Self, TypeError> {
        let mut flattened = Vec::new();
        for ty in types {
            flatten_into(&mut flattened, ty);
        }
        if flattened.iter().any(|ty| ty.is_mixed()) {
            return Err(TypeError::ForbiddenMixedType);
        }
        Ok(Self { types: flattened })
    }

    /// Flattened members, in construction order.
    pub fn types(&self) -> &[TypeRef] {
        &self.types
    }

    /// Whether `candidate` matches at least one member.
    pub fn is_matched_by<T>(&self, candidate: &T) -> bool
    where
        T: TypeLike + ?Sized,
    {
        self.types.iter().any(|member| candidate.matches(member))
    }
}

fn flatten_into(out: &mut Vec<TypeRef>, ty: TypeRef) {
    match ty.as_ref() {
        Type::Union(union) => {
            for member in &union.types {
                flatten_into(out, member.clone());
            }
        }
        _ => out.push(ty),
    }
}

impl TypeLike for UnionType {
    fn accepts(&self, value: &Value) -> bool {
        self.types.iter().any(|member| member.accepts(value))
    }

    fn matches(&self, other: &Type) -> bool {
        match other {
            Type::Mixed => true,
            Type::Union(other) => self
                .types
                .iter()
                .all(|member| other.is_matched_by(member.as_ref())),
            _ => self.types.iter().any(|member| member.matches(other)),
        }
    }

    fn native_type(&self) -> TypeRef {
        let mut distinct: IndexMap<String, TypeRef> = IndexMap::new();
        for member in &self.types {
            let native = member.native_type();
            distinct.entry(native.to_string()).or_insert(native);
        }
        let natives: Vec<TypeRef> = distinct.into_values().collect();
        if let [single] = natives.as_slice() {
            return single.clone();
        }
        // Native types of union members are neither `mixed` nor unions, so no re-check.
        Arc::new(Type::Union(UnionType { types: natives }))
    }
}

impl CompositeType for UnionType {
    fn traverse(&self) -> Vec<TypeRef> {
        let mut out = Vec::new();
        for member in &self.types {
            out.push(member.clone());
            if let Some(composite) = member.as_composite() {
                out.extend(composite.traverse());
            }
        }
        out
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, member) in self.types.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //
