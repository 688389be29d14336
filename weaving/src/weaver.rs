//! Pattern weaving.

use crate::{WeaveError, WeaveResult};
use rebac_core::AttributeRequirement;
use rebac_pattern::{
    GpEdge, GpNode, GraphPattern, MutualExclusionConstraint, PatternError, PatternGraph,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Combine `patterns` into a single pattern enforcing all of them.
///
/// A node of pattern `i` bound to an actor name that an earlier pattern
/// already bound is unified with that earlier node; their types must match.
/// Every other node, and every edge, is renamed to `p{i},{id}`. Requirements,
/// constraints and returned nodes are rewritten through the renaming and
/// concatenated in input order.
pub fn combine_patterns(patterns: &[GraphPattern]) -> WeaveResult<GraphPattern> {
    let mut weaver = Weaver::default();
    for (position, pattern) in patterns.iter().enumerate() {
        weaver.weave(position, pattern)?;
    }
    let combined = weaver.finish()?;

    debug!(
        inputs = patterns.len(),
        nodes = combined.graph().node_count(),
        edges = combined.graph().edge_count(),
        "patterns woven"
    );
    Ok(combined)
}

fn scoped_id(position: usize, id: &str) -> String {
    format!("p{},{}", position, id)
}

/// Accumulates the combined pattern across inputs.
#[derive(Debug, Default)]
struct Weaver {
    /// Actor name -> combined node
    actors: BTreeMap<String, GpNode>,
    nodes: BTreeMap<String, GpNode>,
    edges: Vec<GpEdge>,
    constraints: Vec<MutualExclusionConstraint>,
    node_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    edge_requirements: BTreeMap<String, Vec<AttributeRequirement>>,
    returned_nodes: Vec<String>,
}

impl Weaver {
    fn weave(&mut self, position: usize, pattern: &GraphPattern) -> WeaveResult<()> {
        let renamed = self.unify_nodes(position, pattern)?;
        let rename = |id: &str| {
            renamed
                .get(id)
                .cloned()
                .ok_or_else(|| PatternError::missing_node(id, "weaving"))
        };

        for edge in pattern.graph().edges() {
            let combined = GpEdge::new(
                rename(&edge.source)?,
                rename(&edge.target)?,
                scoped_id(position, &edge.id),
                edge.edge_type.as_str(),
            );
            let requirements = pattern.edge_requirements(&edge.id);
            if !requirements.is_empty() {
                self.edge_requirements
                    .insert(combined.id.clone(), requirements.to_vec());
            }
            self.edges.push(combined);
        }

        for (node, requirements) in pattern.node_requirement_map() {
            self.node_requirements
                .entry(rename(node)?)
                .or_default()
                .extend(requirements.iter().cloned());
        }

        for constraint in pattern.constraints() {
            self.constraints.push(MutualExclusionConstraint::new(
                rename(constraint.first())?,
                rename(constraint.second())?,
            ));
        }

        for node in pattern.returned_nodes() {
            self.returned_nodes.push(rename(node)?);
        }
        Ok(())
    }

    /// Map every node of `pattern` to its combined node, binding actors.
    fn unify_nodes(
        &mut self,
        position: usize,
        pattern: &GraphPattern,
    ) -> WeaveResult<HashMap<String, String>> {
        let mut renamed = HashMap::new();

        for node in pattern.graph().nodes() {
            let mut unified: Option<GpNode> = None;
            for actor in pattern.actors_of(&node.id) {
                let Some(bound) = self.actors.get(actor) else {
                    continue;
                };
                if bound.node_type != node.node_type {
                    return Err(WeaveError::actor_type_mismatch(
                        actor,
                        bound.node_type.as_str(),
                        node.node_type.as_str(),
                    ));
                }
                if unified.is_none() {
                    trace!(actor, node = %node.id, unified = %bound.id, "unifying actor");
                    unified = Some(bound.clone());
                }
            }

            let combined = unified.unwrap_or_else(|| {
                GpNode::new(scoped_id(position, &node.id), node.node_type.as_str())
            });
            for actor in pattern.actors_of(&node.id) {
                self.actors.insert(actor.to_string(), combined.clone());
            }
            renamed.insert(node.id.clone(), combined.id.clone());
            self.nodes.entry(combined.id.clone()).or_insert(combined);
        }

        Ok(renamed)
    }

    fn finish(self) -> WeaveResult<GraphPattern> {
        let graph = PatternGraph::new(self.nodes.into_values(), self.edges)?;
        let actors = self
            .actors
            .into_iter()
            .map(|(actor, node)| (actor, node.id))
            .collect();

        Ok(GraphPattern::new(
            graph,
            self.constraints,
            self.node_requirements,
            self.edge_requirements,
            self.returned_nodes,
            actors,
        )?)
    }
}
