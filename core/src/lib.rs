//! ReBAC Core Types
//!
//! This crate provides the attribute model shared by graphs and patterns:
//! - Attribute values and their numeric view
//! - The `AttributeAware` element trait
//! - Attribute requirements (`key op value` predicates)
//! - Common error types

mod element;
mod error;
mod requirement;
mod value;

pub use element::*;
pub use error::*;
pub use requirement::*;
pub use value::*;
