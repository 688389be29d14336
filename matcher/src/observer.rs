//! Evaluation observers.
//!
//! Observers receive events at fixed points of the search for metrics and
//! benchmarking. They never influence results.

use std::cell::Cell;

/// Work done by one forward-checking step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardCheckStats {
    /// Pattern edges incident to the newly assigned variable
    pub relevant_edges: usize,
    /// Of those, edges whose other end was still unassigned
    pub unassigned_edges: usize,
    /// Graph edges returned by the graph for those pattern edges
    pub neighbours_inspected: usize,
    /// Neighbours that satisfied every requirement
    pub neighbours_accepted: usize,
    /// False if some domain became empty
    pub succeeded: bool,
}

/// A domain narrowed by intersecting it with a neighbour set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntersectionStats {
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub neighbours: usize,
}

/// Hooks invoked by the matcher. Every method defaults to a no-op.
pub trait EvalObserver {
    /// A variable was seeded from an id or unique attribute lookup.
    fn on_seed(&self, _node: &str, _found: bool) {}

    fn on_forward_check(&self, _stats: ForwardCheckStats) {}

    fn on_intersection(&self, _stats: IntersectionStats) {}

    /// Candidates of `node` were dropped by mutual-exclusion constraints.
    fn on_mutual_exclusion_filter(&self, _node: &str, _removed: usize) {}

    /// A result tuple was emitted.
    fn on_result(&self) {}
}

impl<O: EvalObserver + ?Sized> EvalObserver for &O {
    fn on_seed(&self, node: &str, found: bool) {
        (**self).on_seed(node, found)
    }

    fn on_forward_check(&self, stats: ForwardCheckStats) {
        (**self).on_forward_check(stats)
    }

    fn on_intersection(&self, stats: IntersectionStats) {
        (**self).on_intersection(stats)
    }

    fn on_mutual_exclusion_filter(&self, node: &str, removed: usize) {
        (**self).on_mutual_exclusion_filter(node, removed)
    }

    fn on_result(&self) {
        (**self).on_result()
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EvalObserver for NoopObserver {}

/// Totals collected by a [`CountingObserver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalCounts {
    pub seeds: usize,
    pub seeds_missed: usize,
    pub forward_checks: usize,
    pub failed_forward_checks: usize,
    pub neighbours_inspected: usize,
    pub intersections: usize,
    pub excluded_candidates: usize,
    pub results: usize,
}

/// Observer accumulating totals across evaluations.
#[derive(Debug, Default)]
pub struct CountingObserver {
    counts: Cell<EvalCounts>,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> EvalCounts {
        self.counts.get()
    }

    pub fn reset(&self) {
        self.counts.set(EvalCounts::default());
    }

    fn update(&self, f: impl FnOnce(&mut EvalCounts)) {
        let mut counts = self.counts.get();
        f(&mut counts);
        self.counts.set(counts);
    }
}

impl EvalObserver for CountingObserver {
    fn on_seed(&self, _node: &str, found: bool) {
        self.update(|c| {
            c.seeds += 1;
            if !found {
                c.seeds_missed += 1;
            }
        });
    }

    fn on_forward_check(&self, stats: ForwardCheckStats) {
        self.update(|c| {
            c.forward_checks += 1;
            c.neighbours_inspected += stats.neighbours_inspected;
            if !stats.succeeded {
                c.failed_forward_checks += 1;
            }
        });
    }

    fn on_intersection(&self, _stats: IntersectionStats) {
        self.update(|c| c.intersections += 1);
    }

    fn on_mutual_exclusion_filter(&self, _node: &str, removed: usize) {
        self.update(|c| c.excluded_candidates += removed);
    }

    fn on_result(&self) {
        self.update(|c| c.results += 1);
    }
}
