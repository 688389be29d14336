//! Weaving error types.

use rebac_pattern::PatternError;
use thiserror::Error;

/// Errors raised while combining patterns.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeaveError {
    /// An actor name is bound to nodes of different types.
    #[error("Actor '{actor}' is bound to a node of type {expected}, cannot unify with type {actual}")]
    ActorTypeMismatch {
        actor: String,
        expected: String,
        actual: String,
    },

    /// The combined pattern is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl WeaveError {
    pub fn actor_type_mismatch(
        actor: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ActorTypeMismatch {
            actor: actor.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type for weaving.
pub type WeaveResult<T> = Result<T, WeaveError>;
