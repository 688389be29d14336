//! ReBAC Weaving
//!
//! Combines separately authored graph patterns into one:
//! - Nodes bound to the same actor name are unified
//! - Every other node and edge is renamed per input pattern
//! - Requirements, constraints and returned nodes are carried over

mod error;
mod weaver;

pub use error::{WeaveError, WeaveResult};
pub use weaver::combine_patterns;
