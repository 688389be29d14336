//! ReBAC Graph Access
//!
//! This crate provides the graph side of pattern evaluation:
//! - The graph access capability traits consumed by the matcher
//! - An in-memory attributed graph with adjacency and unique-attribute indexes
//! - A traced wrapper counting every access made through it

mod access;
mod error;
mod index;
mod memory;
mod traced;

pub use access::*;
pub use error::*;
pub use memory::*;
pub use traced::*;
