//! Domain module
//!
//! Aggregates, value objects and the agent matcher.

pub mod aggregates;
pub mod value_objects;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;
