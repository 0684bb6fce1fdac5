//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Category, ChatLog, Notification, RatingRecord, Ticket, User};
use crate::domain::value_objects::{CategoryId, EntityId};

/// User repository port
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// All users in insertion order
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Agent accounts in insertion order
    async fn list_agents(&self) -> Result<Vec<User>, RepositoryError>;

    /// Insert or update
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;
}

/// Category repository port
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Insert only. Fails with `DuplicateKey` when the id is taken.
    async fn insert(&self, category: &Category) -> Result<(), RepositoryError>;

    async fn save(&self, category: &Category) -> Result<(), RepositoryError>;
}

/// Ticket repository port
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Ticket>, RepositoryError>;

    /// All tickets in creation order
    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError>;

    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError>;
}

/// Chat log repository port
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_by_ticket(&self, ticket_id: &EntityId) -> Result<Option<ChatLog>, RepositoryError>;

    async fn save(&self, chat: &ChatLog) -> Result<(), RepositoryError>;
}

/// Notification repository port
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), RepositoryError>;

    /// Newest first, at most `limit`
    async fn find_by_user(&self, user_id: &EntityId, limit: usize) -> Result<Vec<Notification>, RepositoryError>;

    /// Returns false when no notification with that id belongs to the user
    async fn mark_read(&self, id: &EntityId, user_id: &EntityId) -> Result<bool, RepositoryError>;
}

/// Rating record repository port
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn insert(&self, rating: &RatingRecord) -> Result<(), RepositoryError>;
}

/// Outbound email port
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Repository error type
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("Query error: {0}")]
    QueryError(String),
}

#[derive(Debug, Error)]
#[error("Mail delivery failed: {0}")]
pub struct MailError(pub String);
