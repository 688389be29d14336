//! GP-Eval search.

use crate::index::{PatternIndex, RelevantEdge};
use crate::{
    EvalError, EvalObserver, EvalResult, ForwardCheckStats, IntersectionStats, MatcherConfig,
    NodeSet, NoopObserver,
};
use rebac_core::{AttributeRequirement, RequirementOperator};
use rebac_graph::{AttributedEdge, AttributedGraph, AttributedNode};
use rebac_pattern::GraphPattern;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Result tuples of an evaluation, positionally matching the pattern's
/// returned nodes.
pub type MatchSet<N> = HashSet<Vec<N>>;

/// Evaluate a pattern against a graph with the default configuration.
pub fn evaluate<G: AttributedGraph>(
    graph: G,
    pattern: &GraphPattern,
) -> EvalResult<MatchSet<G::Node>> {
    Matcher::new(graph).evaluate(pattern)
}

/// Pattern matcher over an attributed graph.
pub struct Matcher<G, O = NoopObserver> {
    graph: G,
    config: MatcherConfig,
    observer: O,
}

impl<G: AttributedGraph> Matcher<G> {
    /// Create a matcher with the default configuration.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            config: MatcherConfig::default(),
            observer: NoopObserver,
        }
    }
}

impl<G: AttributedGraph, O: EvalObserver> Matcher<G, O> {
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the observer notified during evaluation.
    pub fn with_observer<P: EvalObserver>(self, observer: P) -> Matcher<G, P> {
        Matcher {
            graph: self.graph,
            config: self.config,
            observer,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Find all result tuples of `pattern`.
    ///
    /// Returns an empty set when the pattern has no match. Fails if a
    /// variable can never be reached from a seeded one, or if a requirement
    /// applies an ordering operator to a non-numeric attribute.
    pub fn evaluate(&self, pattern: &GraphPattern) -> EvalResult<MatchSet<G::Node>> {
        let index = PatternIndex::new(pattern)?;
        debug!(
            nodes = index.len(),
            edges = pattern.graph().edge_count(),
            constraints = pattern.constraints().len(),
            "evaluating pattern"
        );

        let mut search = Search {
            graph: &self.graph,
            config: &self.config,
            observer: &self.observer,
            index: &index,
            results: HashSet::new(),
        };

        let Some(candidates) = search.seed()? else {
            return Ok(HashSet::new());
        };

        let branch = Branch {
            candidates,
            assignments: vec![None; index.len()],
            assigned: 0,
        };
        let mut incoming = vec![NodeSet::with_capacity(index.len()); index.len()];
        search.run(branch, &mut incoming, 0)?;

        debug!(results = search.results.len(), "evaluation finished");
        Ok(search.results)
    }
}

/// Per-branch search state. Every recursive step works on its own copy.
#[derive(Debug, Clone)]
struct Branch<N> {
    /// Candidate domains of unassigned variables that have been reached
    candidates: BTreeMap<usize, Vec<N>>,
    assignments: Vec<Option<N>>,
    assigned: usize,
}

impl<N: Clone> Branch<N> {
    fn is_complete(&self) -> bool {
        self.assigned == self.assignments.len()
    }

    fn is_assigned(&self, var: usize) -> bool {
        self.assignments[var].is_some()
    }

    fn assignment(&self, var: usize) -> Option<&N> {
        self.assignments[var].as_ref()
    }

    /// A child branch with `var` bound to `value` and its domain dropped.
    fn assign(&self, var: usize, value: N) -> Self {
        let candidates = self
            .candidates
            .iter()
            .filter(|(v, _)| **v != var)
            .map(|(v, domain)| (*v, domain.clone()))
            .collect();
        let mut assignments = self.assignments.clone();
        assignments[var] = Some(value);
        Self {
            candidates,
            assignments,
            assigned: self.assigned + 1,
        }
    }
}

/// Incoming conflicts: for each variable, the variables whose choices
/// narrowed its domain.
type Conflicts = Vec<NodeSet>;

fn absorb(conflicts: &mut NodeSet, incoming: &Conflicts, var: usize) {
    conflicts.union_with(&incoming[var]);
}

struct Search<'a, 'p, G: AttributedGraph, O> {
    graph: &'a G,
    config: &'a MatcherConfig,
    observer: &'a O,
    index: &'a PatternIndex<'p>,
    results: MatchSet<G::Node>,
}

impl<G: AttributedGraph, O: EvalObserver> Search<'_, '_, G, O> {
    /// Resolve fixed variables and check their requirements.
    ///
    /// Returns `None` when a lookup misses or a seeded node fails its own
    /// requirements, meaning the pattern has no match at all.
    fn seed(&self) -> EvalResult<Option<BTreeMap<usize, Vec<G::Node>>>> {
        let mut candidates = BTreeMap::new();

        for (var, variable) in self.index.variables() {
            for requirement in variable.requirements {
                let Some(found) = self.seed_lookup(&variable.node.node_type, requirement) else {
                    continue;
                };
                self.observer.on_seed(&variable.node.id, found.is_some());
                match found {
                    Some(node) => {
                        candidates.insert(var, vec![node]);
                    }
                    None => {
                        debug!(node = %variable.node.id, %requirement, "fixed node not found");
                        return Ok(None);
                    }
                }
            }
        }

        for (&var, domain) in candidates.iter_mut() {
            let mut kept = Vec::with_capacity(domain.len());
            for node in domain.drain(..) {
                if self.check_node(var, &node)? {
                    kept.push(node);
                }
            }
            if kept.is_empty() {
                debug!(
                    node = self.index.id(var),
                    "fixed node violates its requirements"
                );
                return Ok(None);
            }
            *domain = kept;
        }

        Ok(Some(candidates))
    }

    /// `Some(lookup result)` if `requirement` can seed a variable of
    /// `node_type`, `None` if it cannot.
    fn seed_lookup(
        &self,
        node_type: &str,
        requirement: &AttributeRequirement,
    ) -> Option<Option<G::Node>> {
        if let Some(id) = requirement.fixed_id() {
            return Some(self.graph.find_node_by_id(id));
        }
        if self.config.unique_attribute_seeding
            && requirement.operator() == RequirementOperator::Equal
            && self
                .graph
                .is_attribute_unique_for_node_type(requirement.key(), node_type)
        {
            return Some(self.graph.node_by_unique_attribute(
                node_type,
                requirement.key(),
                requirement.value(),
            ));
        }
        None
    }

    /// Recursive phase. Returns the variables where backjumping stops.
    fn run(
        &mut self,
        branch: Branch<G::Node>,
        incoming: &mut Conflicts,
        depth: usize,
    ) -> EvalResult<NodeSet> {
        if branch.is_complete() {
            let tuple = self
                .index
                .returned()
                .iter()
                .map(|&var| branch.assignment(var).cloned())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| EvalError::inconsistent_state("returned node left unassigned"))?;
            trace!(depth, ?tuple, "result");
            self.results.insert(tuple);
            self.observer.on_result();
            // no other assignment above the returned nodes can change this tuple
            return Ok(self.index.returned_set().clone());
        }

        let current = self.pick_next_node(&branch)?;
        let mut domain = branch
            .candidates
            .get(&current)
            .cloned()
            .ok_or_else(|| EvalError::inconsistent_state("picked node has no domain"))?;
        if !self.index.variable(current).exclusions.is_empty() {
            self.filter_mutual_exclusion(current, &mut domain, &branch, &mut incoming[current]);
        }
        trace!(
            depth,
            node = self.index.id(current),
            candidates = domain.len(),
            "branching"
        );

        let mut dead_end = true;
        let mut conflicts = NodeSet::with_capacity(self.index.len());
        let mut outgoing = NodeSet::with_capacity(self.index.len());

        for candidate in domain {
            let mut child = branch.assign(current, candidate);
            let mut child_incoming = incoming.clone();
            if !self.forward_check(current, &mut child, &mut child_incoming, &mut outgoing)? {
                continue;
            }
            dead_end = false;

            // The recursion receives the branch-local conflict map.
            let jump = self.run(child, &mut child_incoming, depth + 1)?;
            if !jump.is_empty() && !jump.contains(current) {
                trace!(depth, node = self.index.id(current), jump = ?jump, "backjump");
                return Ok(jump);
            }
            conflicts.union_with(&jump);
        }

        if dead_end {
            absorb(&mut conflicts, incoming, current);
            for var in outgoing.iter() {
                absorb(&mut conflicts, incoming, var);
            }
            return Ok(conflicts);
        }

        conflicts.union_with(self.index.returned_set());
        for &var in self.index.returned() {
            absorb(&mut conflicts, incoming, var);
        }
        if !outgoing.is_empty() {
            absorb(&mut conflicts, incoming, current);
            for var in outgoing.iter() {
                absorb(&mut conflicts, incoming, var);
            }
        }
        Ok(conflicts)
    }

    /// Minimum remaining values; ties go to the lowest index.
    fn pick_next_node(&self, branch: &Branch<G::Node>) -> EvalResult<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (&var, domain) in &branch.candidates {
            if self.config.sanity_checks && branch.is_assigned(var) {
                return Err(EvalError::inconsistent_state(format!(
                    "assigned node '{}' still has candidates",
                    self.index.id(var)
                )));
            }
            if best.map_or(true, |(_, size)| domain.len() < size) {
                best = Some((var, domain.len()));
            }
        }

        best.map(|(var, _)| var).ok_or_else(|| {
            let unassigned = (0..self.index.len())
                .filter(|&var| !branch.is_assigned(var))
                .map(|var| self.index.id(var).to_string())
                .collect();
            EvalError::uncoverable(unassigned)
        })
    }

    /// Drop candidates already bound to an excluded partner, recording the
    /// partner as a conflict of `var`.
    fn filter_mutual_exclusion(
        &self,
        var: usize,
        domain: &mut Vec<G::Node>,
        branch: &Branch<G::Node>,
        var_incoming: &mut NodeSet,
    ) {
        let partners = &self.index.variable(var).exclusions;
        let before = domain.len();
        domain.retain(|candidate| {
            match partners
                .iter()
                .find(|&&partner| branch.assignment(partner) == Some(candidate))
            {
                Some(&partner) => {
                    var_incoming.insert(partner);
                    false
                }
                None => true,
            }
        });
        self.observer
            .on_mutual_exclusion_filter(self.index.id(var), before - domain.len());
    }

    /// Narrow the domains of unassigned neighbours of the newly assigned
    /// `current`. Fails if any domain becomes empty; that variable is then
    /// recorded in `outgoing`.
    fn forward_check(
        &self,
        current: usize,
        branch: &mut Branch<G::Node>,
        incoming: &mut Conflicts,
        outgoing: &mut NodeSet,
    ) -> EvalResult<bool> {
        let bound = branch
            .assignment(current)
            .cloned()
            .ok_or_else(|| EvalError::inconsistent_state("forward checking an unassigned node"))?;
        let relevant_edges = &self.index.variable(current).relevant_edges;
        let mut stats = ForwardCheckStats {
            relevant_edges: relevant_edges.len(),
            succeeded: true,
            ..Default::default()
        };

        for edge in relevant_edges {
            let other = edge.other;
            if branch.is_assigned(other) {
                continue;
            }
            stats.unassigned_edges += 1;

            let neighbours = self.neighbours(&bound, edge, &mut stats)?;
            stats.neighbours_accepted += neighbours.len();
            let shrinks = match branch.candidates.get(&other) {
                None => true,
                Some(domain) => {
                    let accepted: HashSet<&G::Node> = neighbours.iter().collect();
                    !domain.iter().all(|node| accepted.contains(node))
                }
            };
            if shrinks {
                let carried = incoming[current].clone();
                incoming[other].union_with(&carried);
                incoming[other].insert(current);
            }

            let domain = match branch.candidates.get(&other) {
                None => neighbours,
                Some(existing) => {
                    let kept: HashSet<&G::Node> = existing.iter().collect();
                    let narrowed: Vec<_> = neighbours
                        .iter()
                        .filter(|node| kept.contains(node))
                        .cloned()
                        .collect();
                    self.observer.on_intersection(IntersectionStats {
                        candidates_before: existing.len(),
                        candidates_after: narrowed.len(),
                        neighbours: neighbours.len(),
                    });
                    narrowed
                }
            };

            if domain.is_empty() {
                outgoing.insert(other);
                stats.succeeded = false;
                self.observer.on_forward_check(stats);
                return Ok(false);
            }
            branch.candidates.insert(other, domain);
        }

        self.observer.on_forward_check(stats);
        Ok(true)
    }

    /// Graph neighbours of `bound` along `edge` satisfying every
    /// requirement of the edge and of the node at its other end.
    fn neighbours(
        &self,
        bound: &G::Node,
        edge: &RelevantEdge<'_>,
        stats: &mut ForwardCheckStats,
    ) -> EvalResult<Vec<G::Node>> {
        let graph_edges = if edge.outgoing {
            self.graph.find_outgoing_edges(bound, &edge.edge.edge_type)
        } else {
            self.graph.find_incoming_edges(bound, &edge.edge.edge_type)
        };
        stats.neighbours_inspected += graph_edges.len();

        let other = self.index.variable(edge.other);
        let mut seen = HashSet::new();
        let mut accepted = Vec::new();
        for graph_edge in &graph_edges {
            let neighbour = if edge.outgoing {
                graph_edge.target()
            } else {
                graph_edge.source()
            };
            if !graph_edge.has_edge_type(&edge.edge.edge_type)
                || !neighbour.has_node_type(&other.node.node_type)
                || !AttributeRequirement::all_satisfied(edge.requirements, graph_edge)?
                || !AttributeRequirement::all_satisfied(other.requirements, &neighbour)?
                || !self.check_self_loops(edge.other, &neighbour)?
            {
                continue;
            }
            if seen.insert(neighbour.clone()) {
                accepted.push(neighbour);
            }
        }
        Ok(accepted)
    }

    /// Node requirements plus self-connections.
    fn check_node(&self, var: usize, node: &G::Node) -> EvalResult<bool> {
        let variable = self.index.variable(var);
        Ok(AttributeRequirement::all_satisfied(variable.requirements, node)?
            && self.check_self_loops(var, node)?)
    }

    /// Every required self-connection of `var` must exist on `node` as an
    /// outgoing edge back to itself satisfying the edge requirements.
    ///
    /// Forward checking skips edges between assigned variables, so these are
    /// verified whenever a node is accepted for `var`.
    fn check_self_loops(&self, var: usize, node: &G::Node) -> EvalResult<bool> {
        for self_loop in &self.index.variable(var).self_loops {
            let edge_type = &self_loop.edge.edge_type;
            let mut satisfied = false;
            for graph_edge in self.graph.find_outgoing_edges(node, edge_type) {
                if graph_edge.target() == *node
                    && AttributeRequirement::all_satisfied(self_loop.requirements, &graph_edge)?
                {
                    satisfied = true;
                    break;
                }
            }
            if !satisfied {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
