//! Pattern graphs.

use crate::{GpEdge, GpNode, PatternError, PatternResult};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// The nodes and edges of a graph pattern.
///
/// Outgoing and incoming indices mirror the edge set exactly. Nodes and
/// edges are kept in id order so iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternGraph {
    nodes: BTreeMap<String, GpNode>,
    edges: BTreeMap<String, GpEdge>,
    /// Node id -> ids of edges leaving it
    outgoing: BTreeMap<String, Vec<String>>,
    /// Node id -> ids of edges entering it
    incoming: BTreeMap<String, Vec<String>>,
}

impl PatternGraph {
    /// Build a pattern graph, checking that every edge endpoint is declared.
    ///
    /// Repeated identical nodes or edges collapse into one; two different
    /// declarations sharing an id are rejected.
    pub fn new(
        nodes: impl IntoIterator<Item = GpNode>,
        edges: impl IntoIterator<Item = GpEdge>,
    ) -> PatternResult<Self> {
        let mut graph = Self::default();

        for node in nodes {
            match graph.nodes.entry(node.id.clone()) {
                Entry::Occupied(existing) if existing.get() == &node => {}
                Entry::Occupied(_) => return Err(PatternError::duplicate_node_id(node.id)),
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
            }
        }

        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !graph.nodes.contains_key(endpoint) {
                    return Err(PatternError::missing_node(
                        endpoint.as_str(),
                        format!("edge '{}'", edge.id),
                    ));
                }
            }

            match graph.edges.entry(edge.id.clone()) {
                Entry::Occupied(existing) if existing.get() == &edge => {}
                Entry::Occupied(_) => return Err(PatternError::duplicate_edge_id(edge.id)),
                Entry::Vacant(slot) => {
                    graph
                        .outgoing
                        .entry(edge.source.clone())
                        .or_default()
                        .push(edge.id.clone());
                    graph
                        .incoming
                        .entry(edge.target.clone())
                        .or_default()
                        .push(edge.id.clone());
                    slot.insert(edge);
                }
            }
        }

        for ids in graph.outgoing.values_mut() {
            ids.sort();
        }
        for ids in graph.incoming.values_mut() {
            ids.sort();
        }

        Ok(graph)
    }

    pub fn node(&self, id: &str) -> Option<&GpNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&GpEdge> {
        self.edges.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &GpNode> + '_ {
        self.nodes.values()
    }

    /// All edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &GpEdge> + '_ {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving `node`, self-loops included.
    pub fn outgoing<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a GpEdge> + 'a {
        self.adjacent(&self.outgoing, node)
    }

    /// Edges entering `node`, self-loops included.
    pub fn incoming<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a GpEdge> + 'a {
        self.adjacent(&self.incoming, node)
    }

    /// Required self-connections of `node`.
    pub fn self_loops<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a GpEdge> + 'a {
        self.outgoing(node).filter(|edge| edge.is_self_loop())
    }

    fn adjacent<'a>(
        &'a self,
        index: &'a BTreeMap<String, Vec<String>>,
        node: &str,
    ) -> impl Iterator<Item = &'a GpEdge> + 'a {
        index
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id))
    }
}
