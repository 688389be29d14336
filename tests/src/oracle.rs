//! Brute-force reference matcher.
//!
//! Enumerates every assignment of typed graph nodes to pattern variables and
//! keeps those satisfying all requirements, edges and constraints. Only
//! usable on small graphs; property tests compare the real matcher against it.

use rebac_core::{AttributeRequirement, CoreResult};
use rebac_graph::{AttributedEdge, AttributedGraph, InMemoryGraph, MemoryNode};
use rebac_matcher::MatchSet;
use rebac_pattern::GraphPattern;
use std::collections::{HashMap, HashSet};

/// All result tuples of `pattern` in `graph`, by exhaustive search.
///
/// Unlike the matcher, every variable must carry its declared node type,
/// including variables fixed by id.
pub fn brute_force(
    graph: &InMemoryGraph,
    pattern: &GraphPattern,
) -> CoreResult<MatchSet<MemoryNode>> {
    let variables: Vec<&str> = pattern.graph().nodes().map(|n| n.id.as_str()).collect();
    let domains: Vec<Vec<MemoryNode>> = pattern
        .graph()
        .nodes()
        .map(|n| graph.nodes_of_type(&n.node_type).cloned().collect())
        .collect();
    let positions: HashMap<&str, usize> = variables
        .iter()
        .enumerate()
        .map(|(i, v)| (*v, i))
        .collect();

    let mut search = Exhaustive {
        graph,
        pattern,
        variables: &variables,
        positions: &positions,
        results: HashSet::new(),
    };
    let mut assignment = Vec::with_capacity(variables.len());
    search.extend(&domains, &mut assignment)?;
    Ok(search.results)
}

struct Exhaustive<'a> {
    graph: &'a InMemoryGraph,
    pattern: &'a GraphPattern,
    variables: &'a [&'a str],
    positions: &'a HashMap<&'a str, usize>,
    results: MatchSet<MemoryNode>,
}

impl Exhaustive<'_> {
    fn extend(
        &mut self,
        domains: &[Vec<MemoryNode>],
        assignment: &mut Vec<MemoryNode>,
    ) -> CoreResult<()> {
        let depth = assignment.len();
        if depth == self.variables.len() {
            if self.accepts(assignment)? {
                let tuple = self
                    .pattern
                    .returned_nodes()
                    .iter()
                    .map(|id| assignment[self.positions[id.as_str()]].clone())
                    .collect();
                self.results.insert(tuple);
            }
            return Ok(());
        }

        let pattern = self.pattern;
        let requirements = pattern.node_requirements(self.variables[depth]);
        for node in &domains[depth] {
            if !AttributeRequirement::all_satisfied(requirements, node)? {
                continue;
            }
            assignment.push(node.clone());
            self.extend(domains, assignment)?;
            assignment.pop();
        }
        Ok(())
    }

    fn accepts(&self, assignment: &[MemoryNode]) -> CoreResult<bool> {
        let bound = |id: &str| &assignment[self.positions[id]];

        for constraint in self.pattern.constraints() {
            if bound(constraint.first()) == bound(constraint.second()) {
                return Ok(false);
            }
        }

        for edge in self.pattern.graph().edges() {
            let source = bound(&edge.source);
            let target = bound(&edge.target);
            let requirements = self.pattern.edge_requirements(&edge.id);
            let mut found = false;
            for candidate in self.graph.find_outgoing_edges(source, &edge.edge_type) {
                if candidate.target() == *target
                    && AttributeRequirement::all_satisfied(requirements, &candidate)?
                {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebac_core::attrs;

    #[test]
    fn test_brute_force_follows_edges_and_constraints() {
        // GIVEN a triangle a -> b -> c -> a
        let graph = InMemoryGraph::builder()
            .node("a", "User", attrs!())
            .node("b", "User", attrs!())
            .node("c", "User", attrs!())
            .edge("a", "b", "ab", "friend", attrs!())
            .edge("b", "c", "bc", "friend", attrs!())
            .edge("c", "a", "ca", "friend", attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("x", "User")
            .node("y", "User")
            .edge("x", "y", "xy", "friend")
            .exclude("x", "y")
            .returns("x")
            .returns("y")
            .build()
            .unwrap();

        // WHEN enumerating
        let results = brute_force(&graph, &pattern).unwrap();

        // THEN every directed edge is one tuple
        assert_eq!(
            crate::result_ids(&results),
            crate::tuples![["a", "b"], ["b", "c"], ["c", "a"]]
        );
    }
}
