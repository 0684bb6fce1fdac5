//! Ports layer
//!
//! Interfaces the application layer depends on.

pub mod outbound;
