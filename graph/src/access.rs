//! Graph access capability.
//!
//! The matcher only ever talks to a graph through these traits. Every call is
//! a read; implementations decide their own isolation guarantees.

use rebac_core::{AttributeAware, AttributeValue};
use std::fmt;
use std::hash::Hash;

/// A node of an attributed graph.
///
/// Handles are cloned freely during search, so they should be cheap to copy.
/// Equality and hashing must follow node identity.
pub trait AttributedNode: AttributeAware + Clone + Eq + Hash + fmt::Debug {
    /// The type label of this node.
    fn node_type(&self) -> &str;

    fn has_node_type(&self, node_type: &str) -> bool {
        self.node_type() == node_type
    }
}

/// A directed, typed edge of an attributed graph.
pub trait AttributedEdge: AttributeAware {
    type Node: AttributedNode;

    fn source(&self) -> Self::Node;

    fn target(&self) -> Self::Node;

    /// The type label of this edge.
    fn edge_type(&self) -> &str;

    fn has_edge_type(&self, edge_type: &str) -> bool {
        self.edge_type() == edge_type
    }
}

/// Read access to an attributed graph.
///
/// The two unique-attribute methods are an optional fast path for seeding
/// variables. Implementations may compute uniqueness once when they are
/// built; schema changes made afterwards are not required to be observed, so
/// a stale answer is possible for graphs mutated behind the implementation's
/// back.
pub trait AttributedGraph {
    type Node: AttributedNode;
    type Edge: AttributedEdge<Node = Self::Node>;

    /// Look up a node by identifier.
    fn find_node_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Edges of the given type leaving `node`.
    fn find_outgoing_edges(&self, node: &Self::Node, edge_type: &str) -> Vec<Self::Edge>;

    /// Edges of the given type entering `node`.
    fn find_incoming_edges(&self, node: &Self::Node, edge_type: &str) -> Vec<Self::Edge>;

    /// Returns true if no two nodes of `node_type` share a value for `key`.
    fn is_attribute_unique_for_node_type(&self, _key: &str, _node_type: &str) -> bool {
        false
    }

    /// Look up the single node of `node_type` whose `key` equals `value`.
    ///
    /// Only meaningful when [`is_attribute_unique_for_node_type`] holds.
    ///
    /// [`is_attribute_unique_for_node_type`]: AttributedGraph::is_attribute_unique_for_node_type
    fn node_by_unique_attribute(
        &self,
        _node_type: &str,
        _key: &str,
        _value: &AttributeValue,
    ) -> Option<Self::Node> {
        None
    }
}

impl<G: AttributedGraph + ?Sized> AttributedGraph for &G {
    type Node = G::Node;
    type Edge = G::Edge;

    fn find_node_by_id(&self, id: &str) -> Option<Self::Node> {
        (**self).find_node_by_id(id)
    }

    fn find_outgoing_edges(&self, node: &Self::Node, edge_type: &str) -> Vec<Self::Edge> {
        (**self).find_outgoing_edges(node, edge_type)
    }

    fn find_incoming_edges(&self, node: &Self::Node, edge_type: &str) -> Vec<Self::Edge> {
        (**self).find_incoming_edges(node, edge_type)
    }

    fn is_attribute_unique_for_node_type(&self, key: &str, node_type: &str) -> bool {
        (**self).is_attribute_unique_for_node_type(key, node_type)
    }

    fn node_by_unique_attribute(
        &self,
        node_type: &str,
        key: &str,
        value: &AttributeValue,
    ) -> Option<Self::Node> {
        (**self).node_by_unique_attribute(node_type, key, value)
    }
}
