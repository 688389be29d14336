//! Evaluation error types.

use rebac_core::CoreError;
use thiserror::Error;

/// Errors that abort a pattern evaluation.
///
/// A pattern without matches is not an error; it evaluates to an empty set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Some variables can never receive candidates: they are not connected
    /// to any seeded variable.
    #[error(
        "No candidate node found for {}; every pattern node needs a connection to a fixed node",
        .unassigned.join(", ")
    )]
    Uncoverable { unassigned: Vec<String> },

    /// A requirement could not be evaluated against a graph element.
    #[error(transparent)]
    Attribute(#[from] CoreError),

    /// An internal invariant of the search was violated.
    #[error("Inconsistent matcher state: {message}")]
    InconsistentState { message: String },
}

impl EvalError {
    pub fn uncoverable(unassigned: Vec<String>) -> Self {
        Self::Uncoverable { unassigned }
    }

    pub fn inconsistent_state(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }
}

/// Result type for pattern evaluation.
pub type EvalResult<T> = Result<T, EvalError>;
