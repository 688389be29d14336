//! Pattern error types.

use rebac_core::CoreError;
use thiserror::Error;

/// Errors raised while constructing a graph pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// A node id is referenced but not declared in the pattern graph.
    #[error("Missing node '{id}' referenced by {referenced_by}")]
    MissingNode { id: String, referenced_by: String },

    /// An edge id is referenced but not declared in the pattern graph.
    #[error("Missing edge '{id}' referenced by {referenced_by}")]
    MissingEdge { id: String, referenced_by: String },

    /// Two different nodes share an id.
    #[error("Duplicate node id '{id}'")]
    DuplicateNodeId { id: String },

    /// Two different edges share an id.
    #[error("Duplicate edge id '{id}'")]
    DuplicateEdgeId { id: String },

    /// An attribute requirement is malformed.
    #[error(transparent)]
    Requirement(#[from] CoreError),
}

impl PatternError {
    pub fn missing_node(id: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::MissingNode {
            id: id.into(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn missing_edge(id: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::MissingEdge {
            id: id.into(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn duplicate_node_id(id: impl Into<String>) -> Self {
        Self::DuplicateNodeId { id: id.into() }
    }

    pub fn duplicate_edge_id(id: impl Into<String>) -> Self {
        Self::DuplicateEdgeId { id: id.into() }
    }
}

/// Result type for pattern construction.
pub type PatternResult<T> = Result<T, PatternError>;
