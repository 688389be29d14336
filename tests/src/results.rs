//! Result tuple helpers.

use rebac_core::AttributeAware;
use rebac_matcher::MatchSet;
use std::hash::Hash;

/// Result tuples rendered as node ids, sorted for stable comparison.
pub fn result_ids<N: AttributeAware + Eq + Hash>(results: &MatchSet<N>) -> Vec<Vec<String>> {
    let mut tuples: Vec<Vec<String>> = results
        .iter()
        .map(|tuple| tuple.iter().map(|node| node.id().to_string()).collect())
        .collect();
    tuples.sort();
    tuples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebac_graph::InMemoryGraph;
    use std::collections::HashSet;

    #[test]
    fn test_result_ids_are_sorted() {
        let graph = InMemoryGraph::builder()
            .node("b", "User", rebac_core::attrs!())
            .node("a", "User", rebac_core::attrs!())
            .build()
            .unwrap();
        let a = graph.node("a").unwrap().clone();
        let b = graph.node("b").unwrap().clone();
        let results: HashSet<Vec<_>> = [vec![b.clone(), a.clone()], vec![a]].into_iter().collect();

        assert_eq!(result_ids(&results), crate::tuples![["a"], ["b", "a"]]);
    }
}
