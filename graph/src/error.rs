//! Graph construction error types.

use rebac_core::AttributeValue;
use thiserror::Error;

/// Errors raised while building an in-memory graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Two nodes share an identifier.
    #[error("Duplicate node id '{id}'")]
    DuplicateNode { id: String },

    /// Two edges share an identifier.
    #[error("Duplicate edge id '{id}'")]
    DuplicateEdge { id: String },

    /// An edge references a node that was never added.
    #[error("Edge '{edge}' references unknown node '{node}'")]
    DanglingEdge { edge: String, node: String },

    /// An attribute declared unique holds the same value on two nodes.
    #[error("Attribute '{key}' of type '{node_type}' is not unique: {value} appears more than once")]
    UniqueViolation {
        node_type: String,
        key: String,
        value: AttributeValue,
    },
}

impl GraphError {
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    pub fn duplicate_edge(id: impl Into<String>) -> Self {
        Self::DuplicateEdge { id: id.into() }
    }

    pub fn dangling_edge(edge: impl Into<String>, node: impl Into<String>) -> Self {
        Self::DanglingEdge {
            edge: edge.into(),
            node: node.into(),
        }
    }

    pub fn unique_violation(
        node_type: impl Into<String>,
        key: impl Into<String>,
        value: AttributeValue,
    ) -> Self {
        Self::UniqueViolation {
            node_type: node_type.into(),
            key: key.into(),
            value,
        }
    }
}

/// Result type for graph construction.
pub type GraphResult<T> = Result<T, GraphError>;
