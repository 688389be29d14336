//! Access-counting graph wrapper.

use crate::{AttributedEdge, AttributedGraph, AttributedNode};
use rebac_core::{AttributeAware, AttributeValue};
use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::trace;

/// Snapshot of the calls made through a [`TracedGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessStats {
    /// `find_node_by_id` calls
    pub node_lookups: u64,
    /// `node_by_unique_attribute` calls
    pub unique_lookups: u64,
    /// `find_outgoing_edges` and `find_incoming_edges` calls
    pub edge_queries: u64,
    /// Total edges handed back by edge queries
    pub edges_returned: u64,
    /// `attribute` calls on nodes and edges handed out by the graph
    pub attribute_reads: u64,
}

#[derive(Debug, Default)]
struct Counters {
    node_lookups: Cell<u64>,
    unique_lookups: Cell<u64>,
    edge_queries: Cell<u64>,
    edges_returned: Cell<u64>,
    attribute_reads: Cell<u64>,
}

fn bump(counter: &Cell<u64>, by: u64) {
    counter.set(counter.get() + by);
}

/// Wraps a graph, logging and counting every access.
///
/// Nodes and edges are handed out wrapped as [`TracedNode`] and
/// [`TracedEdge`], so attribute reads made by the caller are counted too.
/// Useful to measure the work a single evaluation performs, or to bound it
/// from the outside.
#[derive(Debug)]
pub struct TracedGraph<G> {
    inner: G,
    counters: Rc<Counters>,
}

impl<G: AttributedGraph> TracedGraph<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            counters: Rc::default(),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    /// Current totals.
    pub fn stats(&self) -> AccessStats {
        AccessStats {
            node_lookups: self.counters.node_lookups.get(),
            unique_lookups: self.counters.unique_lookups.get(),
            edge_queries: self.counters.edge_queries.get(),
            edges_returned: self.counters.edges_returned.get(),
            attribute_reads: self.counters.attribute_reads.get(),
        }
    }

    /// Reset all totals to zero.
    pub fn reset(&self) {
        self.counters.node_lookups.set(0);
        self.counters.unique_lookups.set(0);
        self.counters.edge_queries.set(0);
        self.counters.edges_returned.set(0);
        self.counters.attribute_reads.set(0);
    }

    fn node(&self, inner: G::Node) -> TracedNode<G::Node> {
        TracedNode {
            inner,
            counters: Rc::clone(&self.counters),
        }
    }

    fn wrap_edges(&self, edges: Vec<G::Edge>) -> Vec<TracedEdge<G::Edge>> {
        bump(&self.counters.edge_queries, 1);
        bump(&self.counters.edges_returned, edges.len() as u64);
        edges
            .into_iter()
            .map(|inner| TracedEdge {
                inner,
                counters: Rc::clone(&self.counters),
            })
            .collect()
    }
}

impl<G: AttributedGraph> AttributedGraph for TracedGraph<G> {
    type Node = TracedNode<G::Node>;
    type Edge = TracedEdge<G::Edge>;

    fn find_node_by_id(&self, id: &str) -> Option<Self::Node> {
        bump(&self.counters.node_lookups, 1);
        let node = self.inner.find_node_by_id(id);
        trace!(id, found = node.is_some(), "find_node_by_id");
        node.map(|inner| self.node(inner))
    }

    fn find_outgoing_edges(&self, node: &Self::Node, edge_type: &str) -> Vec<Self::Edge> {
        let edges = self.inner.find_outgoing_edges(&node.inner, edge_type);
        let edges = self.wrap_edges(edges);
        trace!(
            node = node.id(),
            edge_type,
            count = edges.len(),
            "find_outgoing_edges"
        );
        edges
    }

    fn find_incoming_edges(&self, node: &Self::Node, edge_type: &str) -> Vec<Self::Edge> {
        let edges = self.inner.find_incoming_edges(&node.inner, edge_type);
        let edges = self.wrap_edges(edges);
        trace!(
            node = node.id(),
            edge_type,
            count = edges.len(),
            "find_incoming_edges"
        );
        edges
    }

    fn is_attribute_unique_for_node_type(&self, key: &str, node_type: &str) -> bool {
        self.inner.is_attribute_unique_for_node_type(key, node_type)
    }

    fn node_by_unique_attribute(
        &self,
        node_type: &str,
        key: &str,
        value: &AttributeValue,
    ) -> Option<Self::Node> {
        bump(&self.counters.unique_lookups, 1);
        let node = self.inner.node_by_unique_attribute(node_type, key, value);
        trace!(node_type, key, %value, found = node.is_some(), "node_by_unique_attribute");
        node.map(|inner| self.node(inner))
    }
}

/// A node handed out by a [`TracedGraph`].
///
/// Equality and hashing see only the wrapped node.
#[derive(Clone)]
pub struct TracedNode<N> {
    inner: N,
    counters: Rc<Counters>,
}

impl<N> TracedNode<N> {
    pub fn inner(&self) -> &N {
        &self.inner
    }

    pub fn into_inner(self) -> N {
        self.inner
    }
}

impl<N: AttributeAware> AttributeAware for TracedNode<N> {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        bump(&self.counters.attribute_reads, 1);
        trace!(node = self.inner.id(), key, "node attribute");
        self.inner.attribute(key)
    }
}

impl<N: AttributedNode> AttributedNode for TracedNode<N> {
    fn node_type(&self) -> &str {
        self.inner.node_type()
    }
}

impl<N: PartialEq> PartialEq for TracedNode<N> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<N: Eq> Eq for TracedNode<N> {}

impl<N: Hash> Hash for TracedNode<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<N: fmt::Debug> fmt::Debug for TracedNode<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// An edge handed out by a [`TracedGraph`]; its endpoints are traced too.
pub struct TracedEdge<E> {
    inner: E,
    counters: Rc<Counters>,
}

impl<E> TracedEdge<E> {
    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: AttributedEdge> TracedEdge<E> {
    fn endpoint(&self, inner: E::Node) -> TracedNode<E::Node> {
        TracedNode {
            inner,
            counters: Rc::clone(&self.counters),
        }
    }
}

impl<E: AttributeAware> AttributeAware for TracedEdge<E> {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        bump(&self.counters.attribute_reads, 1);
        trace!(edge = self.inner.id(), key, "edge attribute");
        self.inner.attribute(key)
    }
}

impl<E: AttributedEdge> AttributedEdge for TracedEdge<E> {
    type Node = TracedNode<E::Node>;

    fn source(&self) -> Self::Node {
        self.endpoint(self.inner.source())
    }

    fn target(&self) -> Self::Node {
        self.endpoint(self.inner.target())
    }

    fn edge_type(&self) -> &str {
        self.inner.edge_type()
    }
}

impl<E: fmt::Debug> fmt::Debug for TracedEdge<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
