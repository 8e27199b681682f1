//! Structural type representation and matching.
//!
//! Types are immutable runtime values that test JSON values (`accepts`), test
//! assignability against each other (`matches`), enumerate the sub-types they depend on
//! (`traverse`) and fall back to a primitive shape (`native_type`).
pub mod descriptor;
pub mod error;
pub mod path_de;
pub mod types;

pub use error::{DescriptorError, TypeError};
pub use types::{
    CompositeTraversableType, CompositeType, IntoTypeRef, Type, TypeLike, TypeRef,
};
