//! QuickDesk Support Platform
//!
//! Help-desk domain: users file tickets, agents are matched to them by
//! specialization overlap, and both sides talk through a per-ticket chat log.
//!
//! ## Architecture
//!
//! - **Domain Layer**: aggregates, value objects, the agent matcher
//! - **Application Layer**: services orchestrating the use cases
//! - **Ports Layer**: repository and mailer traits
//! - **Infrastructure Layer**: in-memory stores and a logging mailer
//!
//! ## Features
//! - Ticket creation with automatic agent assignment
//! - Best-provider recommendations for the ticket creator
//! - Ticket search, filtering, sorting and pagination
//! - Per-ticket chat with access control
//! - In-app notifications
//! - Agent ratings feeding back into matching

use thiserror::Error;

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

pub use domain::aggregates::{
    AgentProfile, Category, ChatLog, ChatMessage, Comment, Notification, NotificationKind,
    RatingRecord, Role, Ticket, TicketStatus, User,
};
pub use domain::services::{rank_agents, CandidateScore};
pub use domain::value_objects::{CategoryId, EntityId, RatingSummary, Score, Vote};
pub use application::{
    AgentService, CategoryService, ChatService, NotificationService, TicketService, UserService,
};
pub use ports::outbound::{
    CategoryRepository, ChatRepository, Mailer, NotificationRepository, RatingRepository,
    MailError, RepositoryError, TicketRepository, UserRepository,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum SupportError {
    #[error("Ticket not found")]
    TicketNotFound,

    #[error("Agent not found")]
    AgentNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserExists,

    #[error("Access denied")]
    AccessDenied,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, SupportError>;
