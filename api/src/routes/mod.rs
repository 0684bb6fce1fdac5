//! API Routes

pub mod health;
pub mod auth;
pub mod stats;
pub mod tickets;
pub mod categories;
pub mod users;
pub mod chat;
pub mod notifications;
pub mod agents;
