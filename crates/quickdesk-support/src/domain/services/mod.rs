//! Domain services module

pub mod matcher;

pub use matcher::{rank_agents, CandidateScore};
