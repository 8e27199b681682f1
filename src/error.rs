//! Errors raised while assembling a type graph.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// `mixed` showed up among the members of a union (after flattening).
    #[error("Type `mixed` can only be used as a standalone type and not as a union member.")]
    ForbiddenMixedType,
}

impl TypeError {
    /// Stable diagnostic code, shared with the rest of the mapper's error catalogue.
    pub fn code(&self) -> u64 {
        match self {
            TypeError::ForbiddenMixedType => 1608146262,
        }
    }
}

/// Failure to build a type graph out of a JSON descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
    #[error("literal types need a bool, number or string value, got `{0}`")]
    UnsupportedLiteral(Value),
    #[error("a union needs at least one member")]
    EmptyUnion,
    #[error(transparent)]
    Type(#[from] TypeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_mixed_carries_code_and_message() {
        let error = TypeError::ForbiddenMixedType;
        assert_eq!(error.code(), 1608146262);
        assert_eq!(
            error.to_string(),
            "Type `mixed` can only be used as a standalone type and not as a union member."
        );
    }
}
