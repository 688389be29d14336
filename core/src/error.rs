//! Attribute model error types.

use crate::AttributeValue;
use thiserror::Error;

/// Errors raised by the attribute model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// An ordering predicate was applied to a value that is not numeric.
    #[error("Type mismatch: expected {expected} value, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: AttributeValue,
    },

    /// An attribute requirement is malformed.
    #[error("Invalid requirement on '{key}': {message}")]
    InvalidRequirement { key: String, message: String },
}

impl CoreError {
    pub fn type_mismatch(expected: &'static str, actual: AttributeValue) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    pub fn invalid_requirement(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequirement {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for attribute model operations.
pub type CoreResult<T> = Result<T, CoreError>;
