//! ReBAC Matcher
//!
//! Finds every assignment of graph nodes to the variables of a graph pattern
//! (GP-Eval): a constraint-satisfaction search with forward checking and
//! conflict-directed backjumping.
//!
//! Responsibilities:
//! - Seed fixed variables by id or unique attribute
//! - Pick variables by minimum remaining values
//! - Filter mutual-exclusion constraints and forward-check edges
//! - Backjump over levels unrelated to a failure or solution

mod config;
mod error;
mod index;
mod matcher;
mod node_set;
mod observer;

pub use config::MatcherConfig;
pub use error::{EvalError, EvalResult};
pub use matcher::{evaluate, MatchSet, Matcher};
pub use node_set::NodeSet;
pub use observer::{
    CountingObserver, EvalCounts, EvalObserver, ForwardCheckStats, IntersectionStats, NoopObserver,
};
