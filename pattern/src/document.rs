//! Flat document form of a graph pattern.
//!
//! Policies are authored as JSON documents:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "requestor", "type": "User" }, { "id": "doc", "type": "Document" }],
//!   "edges": [{ "source": "requestor", "target": "doc", "id": "e1", "type": "owns" }],
//!   "node_requirements": { "requestor": [{ "key": "#id", "operator": "EQUAL", "value": "alice" }] },
//!   "constraints": [],
//!   "returns": ["doc"],
//!   "actors": { "requestor": "requestor" }
//! }
//! ```

use crate::{GpEdge, GpNode, GraphPattern, MutualExclusionConstraint, PatternError, PatternGraph};
use rebac_core::AttributeRequirement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialisable view of a [`GraphPattern`]. Validated on conversion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternDocument {
    pub nodes: Vec<GpNode>,
    #[serde(default)]
    pub edges: Vec<GpEdge>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub edge_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    #[serde(default)]
    pub constraints: Vec<(String, String)>,
    #[serde(default)]
    pub returns: Vec<String>,
    #[serde(default)]
    pub actors: BTreeMap<String, String>,
}

impl TryFrom<PatternDocument> for GraphPattern {
    type Error = PatternError;

    fn try_from(doc: PatternDocument) -> Result<Self, Self::Error> {
        let graph = PatternGraph::new(doc.nodes, doc.edges)?;
        let constraints = doc
            .constraints
            .into_iter()
            .map(|(a, b)| MutualExclusionConstraint::new(a, b))
            .collect();

        GraphPattern::new(
            graph,
            constraints,
            doc.node_requirements,
            doc.edge_requirements,
            doc.returns,
            doc.actors,
        )
    }
}

impl From<GraphPattern> for PatternDocument {
    fn from(pattern: GraphPattern) -> Self {
        Self {
            nodes: pattern.graph().nodes().cloned().collect(),
            edges: pattern.graph().edges().cloned().collect(),
            node_requirements: pattern.node_requirement_map().clone(),
            edge_requirements: pattern.edge_requirement_map().clone(),
            constraints: pattern
                .constraints()
                .iter()
                .map(|c| (c.first().to_string(), c.second().to_string()))
                .collect(),
            returns: pattern.returned_nodes().to_vec(),
            actors: pattern.actors().clone(),
        }
    }
}
