//! Graph patterns.

use crate::{
    GpEdge, GpNode, MutualExclusionConstraint, PatternDocument, PatternError, PatternGraph,
    PatternResult,
};
use rebac_core::{AttributeRequirement, AttributeValue, RequirementOperator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete query: a pattern graph plus predicates, constraints, the
/// returned variables and the actor names used for weaving.
///
/// Every node and edge id referenced anywhere in the pattern is checked
/// against the pattern graph at construction, so consumers may assume the
/// pattern is well formed. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatternDocument", into = "PatternDocument")]
pub struct GraphPattern {
    graph: PatternGraph,
    constraints: Vec<MutualExclusionConstraint>,
    node_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    edge_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    returned_nodes: Vec<String>,
    actors: BTreeMap<String, String>,
}

impl GraphPattern {
    /// Create a pattern, checking referential integrity.
    ///
    /// Empty requirement lists are dropped.
    pub fn new(
        graph: PatternGraph,
        constraints: Vec<MutualExclusionConstraint>,
        mut node_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
        mut edge_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
        returned_nodes: Vec<String>,
        actors: BTreeMap<String, String>,
    ) -> PatternResult<Self> {
        node_requirements.retain(|_, requirements| !requirements.is_empty());
        edge_requirements.retain(|_, requirements| !requirements.is_empty());

        let require_node = |id: &str, referenced_by: String| {
            if graph.contains_node(id) {
                Ok(())
            } else {
                Err(PatternError::missing_node(id, referenced_by))
            }
        };

        for node in node_requirements.keys() {
            require_node(node.as_str(), "node requirements".to_string())?;
        }
        for edge in edge_requirements.keys() {
            if !graph.contains_edge(edge) {
                return Err(PatternError::missing_edge(
                    edge.as_str(),
                    "edge requirements",
                ));
            }
        }
        for constraint in &constraints {
            require_node(constraint.first(), format!("constraint {}", constraint))?;
            require_node(constraint.second(), format!("constraint {}", constraint))?;
        }
        for node in &returned_nodes {
            require_node(node.as_str(), "returned nodes".to_string())?;
        }
        for (actor, node) in &actors {
            require_node(node.as_str(), format!("actor '{}'", actor))?;
        }

        Ok(Self {
            graph,
            constraints,
            node_requirements,
            edge_requirements,
            returned_nodes,
            actors,
        })
    }

    pub fn builder() -> GraphPatternBuilder {
        GraphPatternBuilder::new()
    }

    pub fn graph(&self) -> &PatternGraph {
        &self.graph
    }

    pub fn constraints(&self) -> &[MutualExclusionConstraint] {
        &self.constraints
    }

    /// Requirements on one node, empty if it has none.
    pub fn node_requirements(&self, node: &str) -> &[AttributeRequirement] {
        self.node_requirements
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Requirements on one edge, empty if it has none.
    pub fn edge_requirements(&self, edge: &str) -> &[AttributeRequirement] {
        self.edge_requirements
            .get(edge)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_requirement_map(&self) -> &BTreeMap<String, Vec<AttributeRequirement>> {
        &self.node_requirements
    }

    pub fn edge_requirement_map(&self) -> &BTreeMap<String, Vec<AttributeRequirement>> {
        &self.edge_requirements
    }

    /// Ids of the returned nodes, in output order. May repeat.
    pub fn returned_nodes(&self) -> &[String] {
        &self.returned_nodes
    }

    /// Actor name -> node id.
    pub fn actors(&self) -> &BTreeMap<String, String> {
        &self.actors
    }

    /// The node bound to an actor name.
    pub fn actor(&self, name: &str) -> Option<&GpNode> {
        self.actors.get(name).and_then(|id| self.graph.node(id))
    }

    /// Actor names bound to a node, in name order.
    pub fn actors_of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.actors
            .iter()
            .filter(move |(_, bound)| bound.as_str() == node)
            .map(|(name, _)| name.as_str())
    }

    /// The graph node id a node is fixed to by an `#id` requirement.
    pub fn fixed_id(&self, node: &str) -> Option<&str> {
        self.node_requirements(node)
            .iter()
            .find_map(AttributeRequirement::fixed_id)
    }
}

/// Fluent builder for [`GraphPattern`].
///
/// The first malformed requirement is remembered and reported by
/// [`build`](GraphPatternBuilder::build).
#[derive(Debug, Default)]
pub struct GraphPatternBuilder {
    nodes: Vec<GpNode>,
    edges: Vec<GpEdge>,
    constraints: Vec<MutualExclusionConstraint>,
    node_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    edge_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    returned_nodes: Vec<String>,
    actors: BTreeMap<String, String>,
    error: Option<PatternError>,
}

impl GraphPatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a pattern node.
    pub fn node(mut self, id: impl Into<String>, node_type: impl Into<String>) -> Self {
        self.nodes.push(GpNode::new(id, node_type));
        self
    }

    /// Declare a pattern edge between two node ids.
    pub fn edge(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        id: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        self.edges.push(GpEdge::new(source, target, id, edge_type));
        self
    }

    /// Add a requirement on a node attribute.
    pub fn require_node(
        mut self,
        node: impl Into<String>,
        key: impl Into<String>,
        operator: RequirementOperator,
        value: impl Into<AttributeValue>,
    ) -> Self {
        match AttributeRequirement::new(key, operator, value) {
            Ok(requirement) => self
                .node_requirements
                .entry(node.into())
                .or_default()
                .push(requirement),
            Err(err) => self.fail(err.into()),
        }
        self
    }

    /// Add a requirement on an edge attribute.
    pub fn require_edge(
        mut self,
        edge: impl Into<String>,
        key: impl Into<String>,
        operator: RequirementOperator,
        value: impl Into<AttributeValue>,
    ) -> Self {
        match AttributeRequirement::new(key, operator, value) {
            Ok(requirement) => self
                .edge_requirements
                .entry(edge.into())
                .or_default()
                .push(requirement),
            Err(err) => self.fail(err.into()),
        }
        self
    }

    /// Fix a node to the graph node with the given id.
    pub fn fix(mut self, node: impl Into<String>, id: impl Into<String>) -> Self {
        self.node_requirements
            .entry(node.into())
            .or_default()
            .push(AttributeRequirement::id(id));
        self
    }

    /// Forbid two nodes from binding to the same graph node.
    pub fn exclude(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.constraints.push(MutualExclusionConstraint::new(a, b));
        self
    }

    /// Append a node to the returned tuple.
    pub fn returns(mut self, node: impl Into<String>) -> Self {
        self.returned_nodes.push(node.into());
        self
    }

    /// Bind an actor name to a node.
    pub fn actor(mut self, name: impl Into<String>, node: impl Into<String>) -> Self {
        self.actors.insert(name.into(), node.into());
        self
    }

    pub fn build(self) -> PatternResult<GraphPattern> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let graph = PatternGraph::new(self.nodes, self.edges)?;
        GraphPattern::new(
            graph,
            self.constraints,
            self.node_requirements,
            self.edge_requirements,
            self.returned_nodes,
            self.actors,
        )
    }

    fn fail(&mut self, err: PatternError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
