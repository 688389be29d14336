//! Indexes for in-memory graph lookups.

use crate::MemoryEdge;
use rebac_core::AttributeValue;
use std::collections::{BTreeSet, HashMap};

/// Type index: node type -> node ids
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<String, BTreeSet<String>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_type: &str, node_id: &str) {
        self.index
            .entry(node_type.to_string())
            .or_default()
            .insert(node_id.to_string());
    }

    pub fn get<'a>(&'a self, node_type: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.index
            .get(node_type)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}

/// Adjacency index: node id -> edge type -> edges, kept for both directions.
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Edges leaving the node
    outbound: HashMap<String, HashMap<String, Vec<MemoryEdge>>>,
    /// Edges entering the node
    inbound: HashMap<String, HashMap<String, Vec<MemoryEdge>>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: &MemoryEdge) {
        let edge_type = edge.edge_type_str().to_string();

        self.outbound
            .entry(edge.source_id().to_string())
            .or_default()
            .entry(edge_type.clone())
            .or_default()
            .push(edge.clone());

        self.inbound
            .entry(edge.target_id().to_string())
            .or_default()
            .entry(edge_type)
            .or_default()
            .push(edge.clone());
    }

    pub fn edges_from(&self, node_id: &str, edge_type: &str) -> &[MemoryEdge] {
        Self::lookup(&self.outbound, node_id, edge_type)
    }

    pub fn edges_to(&self, node_id: &str, edge_type: &str) -> &[MemoryEdge] {
        Self::lookup(&self.inbound, node_id, edge_type)
    }

    fn lookup<'a>(
        side: &'a HashMap<String, HashMap<String, Vec<MemoryEdge>>>,
        node_id: &str,
        edge_type: &str,
    ) -> &'a [MemoryEdge] {
        side.get(node_id)
            .and_then(|by_type| by_type.get(edge_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Unique attribute index: (node type, key) -> value -> node id
#[derive(Debug, Default)]
pub struct UniqueAttributeIndex {
    index: HashMap<(String, String), HashMap<AttributeValue, String>>,
}

impl UniqueAttributeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key` unique for `node_type`.
    pub fn declare(&mut self, node_type: &str, key: &str) {
        self.index
            .entry((node_type.to_string(), key.to_string()))
            .or_default();
    }

    pub fn is_declared(&self, node_type: &str, key: &str) -> bool {
        self.index
            .contains_key(&(node_type.to_string(), key.to_string()))
    }

    /// Record a node's value. Returns false if the value is already taken.
    pub fn insert(
        &mut self,
        node_type: &str,
        key: &str,
        value: &AttributeValue,
        node_id: &str,
    ) -> bool {
        let scope = (node_type.to_string(), key.to_string());
        let Some(values) = self.index.get_mut(&scope) else {
            return true;
        };
        if values.contains_key(value) {
            return false;
        }
        values.insert(value.clone(), node_id.to_string());
        true
    }

    pub fn get(&self, node_type: &str, key: &str, value: &AttributeValue) -> Option<&str> {
        self.index
            .get(&(node_type.to_string(), key.to_string()))
            .and_then(|values| values.get(value))
            .map(String::as_str)
    }
}
