//! In-memory attributed graph.

use crate::index::{AdjacencyIndex, TypeIndex, UniqueAttributeIndex};
use crate::{AttributedEdge, AttributedGraph, AttributedNode, GraphError, GraphResult};
use rebac_core::{AttributeAware, AttributeValue, Attributes};
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct NodeData {
    id: String,
    node_type: String,
    attributes: Attributes,
}

/// A node handle of an [`InMemoryGraph`]. Identity is by id.
#[derive(Clone)]
pub struct MemoryNode(Arc<NodeData>);

impl MemoryNode {
    pub fn attributes(&self) -> &Attributes {
        &self.0.attributes
    }
}

impl AttributeAware for MemoryNode {
    fn id(&self) -> &str {
        &self.0.id
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        self.0.attributes.get(key).cloned()
    }
}

impl AttributedNode for MemoryNode {
    fn node_type(&self) -> &str {
        &self.0.node_type
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for MemoryNode {}

impl Hash for MemoryNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl PartialOrd for MemoryNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemoryNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.id.cmp(&other.0.id)
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.id, self.0.node_type)
    }
}

#[derive(Debug)]
struct EdgeData {
    id: String,
    edge_type: String,
    source: MemoryNode,
    target: MemoryNode,
    attributes: Attributes,
}

/// An edge handle of an [`InMemoryGraph`].
#[derive(Clone)]
pub struct MemoryEdge(Arc<EdgeData>);

impl MemoryEdge {
    pub fn attributes(&self) -> &Attributes {
        &self.0.attributes
    }

    pub(crate) fn edge_type_str(&self) -> &str {
        &self.0.edge_type
    }

    pub(crate) fn source_id(&self) -> &str {
        &self.0.source.0.id
    }

    pub(crate) fn target_id(&self) -> &str {
        &self.0.target.0.id
    }
}

impl AttributeAware for MemoryEdge {
    fn id(&self) -> &str {
        &self.0.id
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        self.0.attributes.get(key).cloned()
    }
}

impl AttributedEdge for MemoryEdge {
    type Node = MemoryNode;

    fn source(&self) -> MemoryNode {
        self.0.source.clone()
    }

    fn target(&self) -> MemoryNode {
        self.0.target.clone()
    }

    fn edge_type(&self) -> &str {
        &self.0.edge_type
    }
}

impl fmt::Debug for MemoryEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -[{}:{}]-> {}",
            self.source_id(),
            self.0.id,
            self.0.edge_type,
            self.target_id()
        )
    }
}

/// An immutable attributed graph held in memory.
///
/// Built once through [`InMemoryGraphBuilder`]; uniqueness of declared
/// attributes is verified at build time and never recomputed.
#[derive(Debug)]
pub struct InMemoryGraph {
    /// Node storage, ordered by id
    nodes: BTreeMap<String, MemoryNode>,
    /// Edge storage, ordered by id
    edges: BTreeMap<String, MemoryEdge>,
    /// Type index
    type_index: TypeIndex,
    /// Adjacency index
    adj_index: AdjacencyIndex,
    /// Unique attribute index
    unique_index: UniqueAttributeIndex,
}

impl InMemoryGraph {
    pub fn builder() -> InMemoryGraphBuilder {
        InMemoryGraphBuilder::new()
    }

    /// Get a node by id.
    pub fn node(&self, id: &str) -> Option<&MemoryNode> {
        self.nodes.get(id)
    }

    /// Get an edge by id.
    pub fn edge(&self, id: &str) -> Option<&MemoryEdge> {
        self.edges.get(id)
    }

    /// Iterate all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &MemoryNode> + '_ {
        self.nodes.values()
    }

    /// Iterate all edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &MemoryEdge> + '_ {
        self.edges.values()
    }

    /// Iterate the nodes of one type in id order.
    pub fn nodes_of_type<'a>(
        &'a self,
        node_type: &str,
    ) -> impl Iterator<Item = &'a MemoryNode> + 'a {
        self.type_index
            .get(node_type)
            .filter_map(move |id| self.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl AttributedGraph for InMemoryGraph {
    type Node = MemoryNode;
    type Edge = MemoryEdge;

    fn find_node_by_id(&self, id: &str) -> Option<MemoryNode> {
        self.nodes.get(id).cloned()
    }

    fn find_outgoing_edges(&self, node: &MemoryNode, edge_type: &str) -> Vec<MemoryEdge> {
        self.adj_index.edges_from(node.id(), edge_type).to_vec()
    }

    fn find_incoming_edges(&self, node: &MemoryNode, edge_type: &str) -> Vec<MemoryEdge> {
        self.adj_index.edges_to(node.id(), edge_type).to_vec()
    }

    fn is_attribute_unique_for_node_type(&self, key: &str, node_type: &str) -> bool {
        self.unique_index.is_declared(node_type, key)
    }

    fn node_by_unique_attribute(
        &self,
        node_type: &str,
        key: &str,
        value: &AttributeValue,
    ) -> Option<MemoryNode> {
        self.unique_index
            .get(node_type, key, value)
            .and_then(|id| self.nodes.get(id))
            .cloned()
    }
}

struct PendingEdge {
    source: String,
    target: String,
    id: String,
    edge_type: String,
    attributes: Attributes,
}

/// Builder for [`InMemoryGraph`].
#[derive(Default)]
pub struct InMemoryGraphBuilder {
    nodes: Vec<NodeData>,
    edges: Vec<PendingEdge>,
    unique: Vec<(String, String)>,
}

impl InMemoryGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn node(
        mut self,
        id: impl Into<String>,
        node_type: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        self.nodes.push(NodeData {
            id: id.into(),
            node_type: node_type.into(),
            attributes,
        });
        self
    }

    /// Add a directed edge between two nodes added to this builder.
    pub fn edge(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        id: impl Into<String>,
        edge_type: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        self.edges.push(PendingEdge {
            source: source.into(),
            target: target.into(),
            id: id.into(),
            edge_type: edge_type.into(),
            attributes,
        });
        self
    }

    /// Declare `key` unique among nodes of `node_type`.
    pub fn unique_attribute(
        mut self,
        node_type: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.unique.push((node_type.into(), key.into()));
        self
    }

    /// Validate and index the graph.
    pub fn build(self) -> GraphResult<InMemoryGraph> {
        let mut nodes = BTreeMap::new();
        let mut type_index = TypeIndex::new();
        let mut unique_index = UniqueAttributeIndex::new();

        for (node_type, key) in &self.unique {
            unique_index.declare(node_type, key);
        }

        for data in self.nodes {
            let node = MemoryNode(Arc::new(data));
            match nodes.entry(node.0.id.clone()) {
                Entry::Occupied(_) => return Err(GraphError::duplicate_node(node.id())),
                Entry::Vacant(slot) => {
                    type_index.insert(node.node_type(), node.id());
                    for (key, value) in node.attributes() {
                        if !unique_index.insert(node.node_type(), key, value, node.id()) {
                            return Err(GraphError::unique_violation(
                                node.node_type(),
                                key.as_str(),
                                value.clone(),
                            ));
                        }
                    }
                    slot.insert(node);
                }
            }
        }

        let mut edges = BTreeMap::new();
        let mut adj_index = AdjacencyIndex::new();

        for pending in self.edges {
            let source = nodes
                .get(&pending.source)
                .cloned()
                .ok_or_else(|| GraphError::dangling_edge(&pending.id, &pending.source))?;
            let target = nodes
                .get(&pending.target)
                .cloned()
                .ok_or_else(|| GraphError::dangling_edge(&pending.id, &pending.target))?;

            let edge = MemoryEdge(Arc::new(EdgeData {
                id: pending.id,
                edge_type: pending.edge_type,
                source,
                target,
                attributes: pending.attributes,
            }));

            match edges.entry(edge.0.id.clone()) {
                Entry::Occupied(_) => return Err(GraphError::duplicate_edge(edge.id())),
                Entry::Vacant(slot) => {
                    adj_index.insert(&edge);
                    slot.insert(edge);
                }
            }
        }

        Ok(InMemoryGraph {
            nodes,
            edges,
            type_index,
            adj_index,
            unique_index,
        })
    }
}
