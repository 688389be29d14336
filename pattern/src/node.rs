//! Pattern nodes and edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed variable of a graph pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GpNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

impl GpNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
        }
    }
}

impl fmt::Display for GpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.node_type)
    }
}

/// A required, typed relationship between two pattern nodes.
///
/// Endpoints are node ids. `source == target` describes a required
/// self-connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GpEdge {
    pub source: String,
    pub target: String,
    pub id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

impl GpEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        id: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            id: id.into(),
            edge_type: edge_type.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other_end(&self, node: &str) -> Option<&str> {
        if self.source == node {
            Some(&self.target)
        } else if self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }
}

impl fmt::Display for GpEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -[{}:{}]-> {}",
            self.source, self.id, self.edge_type, self.target
        )
    }
}
