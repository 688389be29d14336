//! ReBAC Pattern Model
//!
//! Graph patterns are the query language of the matcher:
//! - Pattern nodes (typed variables) and pattern edges
//! - Pattern graphs with outgoing/incoming adjacency
//! - Mutual-exclusion constraints between variables
//! - Graph patterns with requirements, returned nodes and actor bindings
//! - A JSON document form for authoring policies

mod constraint;
mod document;
mod error;
mod graph;
mod node;
mod pattern;

pub use constraint::MutualExclusionConstraint;
pub use document::PatternDocument;
pub use error::{PatternError, PatternResult};
pub use graph::PatternGraph;
pub use node::{GpEdge, GpNode};
pub use pattern::{GraphPattern, GraphPatternBuilder};
