use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::collection;
use super::{
    ArrayKeyType, ArrayType, CompositeTraversableType, CompositeType, Type, TypeLike, TypeRef,
    traverse_sub_type,
};

/// A keyed collection with at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyArrayType {
    key_type: ArrayKeyType,
    sub_type: TypeRef,
    signature: String,
}

static NATIVE: Lazy<TypeRef> = Lazy::new(|| {
    let mut array = NonEmptyArrayType::new(ArrayKeyType::default(), Type::mixed());
    array.signature = "non-empty-array".to_string();
    Arc::new(Type::NonEmptyArray(array))
});

impl NonEmptyArrayType {
    pub fn new(key_type: ArrayKeyType, sub_type: TypeRef) -> Self {
        let signature = collection::signature("non-empty-array", key_type, &sub_type);
        Self { key_type, sub_type, signature }
    }

    /// Shared `non-empty-array`, built on first use.
    pub fn native() -> TypeRef {
        NATIVE.clone()
    }
}

impl TypeLike for NonEmptyArrayType {
    fn accepts(&self, value: &Value) -> bool {
        let Some(mut entries) = collection::entries(value).map(Iterator::peekable) else {
            return false;
        };
        if entries.peek().is_none() {
            return false;
        }
        collection::entries_conform(entries, self.key_type, &self.sub_type)
    }

    fn matches(&self, other: &Type) -> bool {
        if other.is_mixed() {
            return true;
        }
        if let Type::Union(union) = other {
            return union.is_matched_by(self);
        }
        let Some(other) = other.as_traversable() else {
            return false;
        };
        self.key_type.is_subset_of(other.key_type()) && self.sub_type.matches(other.sub_type())
    }

    fn native_type(&self) -> TypeRef {
        ArrayType::native()
    }
}

impl CompositeType for NonEmptyArrayType {
    fn traverse(&self) -> Vec<TypeRef> {
        traverse_sub_type(&self.sub_type)
    }
}

impl CompositeTraversableType for NonEmptyArrayType {
    fn key_type(&self) -> ArrayKeyType {
        self.key_type
    }

    fn sub_type(&self) -> &TypeRef {
        &self.sub_type
    }
}

impl fmt::Display for NonEmptyArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntoTypeRef, ListType, LiteralType, ScalarType, UnionType};
    use serde_json::json;
    use std::thread;

    fn non_empty(key_type: ArrayKeyType, sub_type: TypeRef) -> NonEmptyArrayType {
        NonEmptyArrayType::new(key_type, sub_type)
    }

    #[test]
    fn rejects_values_that_are_not_collections() {
        let array = NonEmptyArrayType::native();
        for value in [json!(null), json!(true), json!(404), json!(42.1337), json!("foo")] {
            assert!(!array.accepts(&value), "{value} is not a collection");
        }
    }

    #[test]
    fn rejects_empty_collections_whatever_the_types() {
        let strict = non_empty(ArrayKeyType::String, ScalarType::Int.shared());
        for array in [non_empty(ArrayKeyType::default(), Type::mixed()), strict] {
            assert!(!array.accepts(&json!([])));
            assert!(!array.accepts(&json!({})));
        }
    }

    #[test]
    fn accepts_non_empty_conforming_collections() {
        let strings = non_empty(ArrayKeyType::default(), ScalarType::String.shared());
        assert!(strings.accepts(&json!(["foo", "bar"])));
        assert!(strings.accepts(&json!({"foo": "bar", "1": "baz"})));

        let by_index = non_empty(ArrayKeyType::Int, ScalarType::String.shared());
        assert!(by_index.accepts(&json!(["foo"])));
        assert!(by_index.accepts(&json!({"42": "foo"})));
    }

    #[test]
    fn a_single_violating_entry_rejects() {
        let strings = non_empty(ArrayKeyType::default(), ScalarType::String.shared());
        assert!(!strings.accepts(&json!(["foo", "bar", 42])));

        let by_index = non_empty(ArrayKeyType::Int, ScalarType::String.shared());
        assert!(!by_index.accepts(&json!({"0": "foo", "bar": "baz"})));

        let by_name = non_empty(ArrayKeyType::String, ScalarType::String.shared());
        assert!(!by_name.accepts(&json!(["foo"])));
    }

    #[test]
    fn signature_omits_default_key_type() {
        assert_eq!(
            non_empty(ArrayKeyType::default(), ScalarType::String.shared()).to_string(),
            "non-empty-array<string>"
        );
        assert_eq!(
            non_empty(ArrayKeyType::Int, ScalarType::String.shared()).to_string(),
            "non-empty-array<int, string>"
        );
        assert_eq!(
            non_empty(ArrayKeyType::String, LiteralType::Int(404).into_ref()).to_string(),
            "non-empty-array<string, 404>"
        );
    }

    #[test]
    fn native_is_a_shared_instance() {
        let native = NonEmptyArrayType::native();
        assert_eq!(native.to_string(), "non-empty-array");
        assert!(Arc::ptr_eq(&native, &NonEmptyArrayType::native()));

        let Type::NonEmptyArray(array) = native.as_ref() else {
            panic!("native type must be a non-empty-array");
        };
        assert_eq!(array.key_type(), ArrayKeyType::default());
        assert!(array.sub_type().is_mixed());
    }

    #[test]
    fn native_initialization_is_race_free() {
        let handles: Vec<_> = (0..8).map(|_| thread::spawn(NonEmptyArrayType::native)).collect();
        let natives: Vec<TypeRef> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for native in &natives {
            assert!(Arc::ptr_eq(native, &natives[0]));
        }
    }

    #[test]
    fn native_type_is_the_general_array() {
        let array = non_empty(ArrayKeyType::Int, ScalarType::String.shared());
        assert!(Arc::ptr_eq(&array.native_type(), &ArrayType::native()));
        assert_eq!(array.native_type().to_string(), "array");
    }

    #[test]
    fn matches_mixed() {
        assert!(non_empty(ArrayKeyType::Int, ScalarType::Float.shared()).matches(&Type::Mixed));
    }

    #[test]
    fn matches_traversable_with_matching_key_and_sub_type() {
        let array = non_empty(ArrayKeyType::default(), ScalarType::String.shared());
        assert!(array.matches(&non_empty(ArrayKeyType::default(), ScalarType::String.shared()).into()));
        assert!(array.matches(&ArrayType::new(ArrayKeyType::default(), ScalarType::String.shared()).into()));
        assert!(array.matches(&NonEmptyArrayType::native()));
        assert!(array.matches(&ArrayType::native()));
        assert!(!array.matches(&non_empty(ArrayKeyType::default(), ScalarType::Int.shared()).into()));
    }

    #[test]
    fn mismatched_key_types_do_not_match() {
        let by_name = non_empty(ArrayKeyType::String, ScalarType::String.shared());
        assert!(!by_name.matches(&non_empty(ArrayKeyType::Int, ScalarType::String.shared()).into()));

        let wide = non_empty(ArrayKeyType::default(), ScalarType::String.shared());
        assert!(!wide.matches(&ListType::new(ScalarType::String.shared()).into()));

        let by_index = non_empty(ArrayKeyType::Int, ScalarType::String.shared());
        assert!(by_index.matches(&ListType::new(ScalarType::String.shared()).into()));
    }

    #[test]
    fn does_not_match_non_traversable_types() {
        let array = NonEmptyArrayType::native();
        assert!(!array.matches(&ScalarType::String.into()));
        assert!(!array.matches(&ArrayKeyType::default().into()));
    }

    #[test]
    fn matching_a_union_asks_the_union() {
        let array = non_empty(ArrayKeyType::default(), ScalarType::Int.shared());
        let accepting = UnionType::new([ScalarType::String.shared(), ArrayType::native()]).unwrap();
        assert!(array.matches(&accepting.into()));

        let rejecting =
            UnionType::new([ScalarType::String.shared(), ScalarType::Int.shared()]).unwrap();
        assert!(!array.matches(&rejecting.into()));
    }

    #[test]
    fn traverse_lists_sub_type_then_its_descendants() {
        let leaf = ScalarType::Int.shared();
        let inner = non_empty(ArrayKeyType::default(), leaf.clone()).into_ref();
        let middle = ListType::new(inner.clone()).into_ref();
        let outer = non_empty(ArrayKeyType::String, middle.clone());

        let traversed = outer.traverse();
        assert_eq!(traversed.len(), 3);
        assert!(Arc::ptr_eq(&traversed[0], &middle));
        assert!(Arc::ptr_eq(&traversed[1], &inner));
        assert!(Arc::ptr_eq(&traversed[2], &leaf));
    }

    #[test]
    fn traverse_of_a_leaf_sub_type_is_just_the_sub_type() {
        let leaf = ScalarType::String.shared();
        let traversed = non_empty(ArrayKeyType::Int, leaf.clone()).traverse();
        assert_eq!(traversed.len(), 1);
        assert!(Arc::ptr_eq(&traversed[0], &leaf));
    }
}
