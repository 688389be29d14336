//! Dense variable index over a graph pattern.
//!
//! The search addresses pattern nodes by position instead of by id. Each
//! variable carries everything forward checking needs: its requirements,
//! the pattern edges incident to it and its mutual-exclusion partners.

use crate::{EvalError, EvalResult, NodeSet};
use rebac_core::AttributeRequirement;
use rebac_pattern::{GpEdge, GpNode, GraphPattern};
use std::collections::HashMap;

/// A pattern edge seen from one of its endpoints.
#[derive(Debug)]
pub(crate) struct RelevantEdge<'p> {
    pub edge: &'p GpEdge,
    /// Variable at the other end
    pub other: usize,
    /// True if the edge leaves the variable this entry belongs to
    pub outgoing: bool,
    pub requirements: &'p [AttributeRequirement],
}

/// A required self-connection of a variable.
#[derive(Debug)]
pub(crate) struct SelfLoop<'p> {
    pub edge: &'p GpEdge,
    pub requirements: &'p [AttributeRequirement],
}

#[derive(Debug)]
pub(crate) struct Variable<'p> {
    pub node: &'p GpNode,
    pub requirements: &'p [AttributeRequirement],
    /// Incoming edges first, then outgoing
    pub relevant_edges: Vec<RelevantEdge<'p>>,
    pub self_loops: Vec<SelfLoop<'p>>,
    /// Mutual-exclusion partners, ascending
    pub exclusions: Vec<usize>,
}

#[derive(Debug)]
pub(crate) struct PatternIndex<'p> {
    variables: Vec<Variable<'p>>,
    returned: Vec<usize>,
    returned_set: NodeSet,
}

impl<'p> PatternIndex<'p> {
    pub fn new(pattern: &'p GraphPattern) -> EvalResult<Self> {
        let graph = pattern.graph();
        let positions: HashMap<&str, usize> = graph
            .nodes()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();
        let position = |id: &str| {
            positions
                .get(id)
                .copied()
                .ok_or_else(|| {
                    EvalError::inconsistent_state(format!("unknown pattern node '{}'", id))
                })
        };

        let mut variables = Vec::with_capacity(positions.len());
        for node in graph.nodes() {
            let mut relevant_edges = Vec::new();
            for edge in graph.incoming(&node.id) {
                relevant_edges.push(RelevantEdge {
                    edge,
                    other: position(&edge.source)?,
                    outgoing: false,
                    requirements: pattern.edge_requirements(&edge.id),
                });
            }
            for edge in graph.outgoing(&node.id) {
                relevant_edges.push(RelevantEdge {
                    edge,
                    other: position(&edge.target)?,
                    outgoing: true,
                    requirements: pattern.edge_requirements(&edge.id),
                });
            }

            let self_loops = graph
                .self_loops(&node.id)
                .map(|edge| SelfLoop {
                    edge,
                    requirements: pattern.edge_requirements(&edge.id),
                })
                .collect();

            let mut exclusions = Vec::new();
            for constraint in pattern.constraints() {
                if let Some(partner) = constraint.partner(&node.id) {
                    exclusions.push(position(partner)?);
                }
            }
            exclusions.sort_unstable();
            exclusions.dedup();

            variables.push(Variable {
                node,
                requirements: pattern.node_requirements(&node.id),
                relevant_edges,
                self_loops,
                exclusions,
            });
        }

        let returned = pattern
            .returned_nodes()
            .iter()
            .map(|id| position(id))
            .collect::<EvalResult<Vec<_>>>()?;
        let returned_set = returned.iter().copied().collect();

        Ok(Self {
            variables,
            returned,
            returned_set,
        })
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn variable(&self, index: usize) -> &Variable<'p> {
        &self.variables[index]
    }

    pub fn variables(&self) -> impl Iterator<Item = (usize, &Variable<'p>)> + '_ {
        self.variables.iter().enumerate()
    }

    pub fn id(&self, index: usize) -> &'p str {
        &self.variables[index].node.id
    }

    /// Returned variables in output order, with repeats.
    pub fn returned(&self) -> &[usize] {
        &self.returned
    }

    pub fn returned_set(&self) -> &NodeSet {
        &self.returned_set
    }
}
