//! In-memory repository implementations

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::aggregates::{Category, ChatLog, Notification, RatingRecord, Ticket, User};
use crate::domain::value_objects::{CategoryId, EntityId};
use crate::ports::outbound::{
    CategoryRepository, ChatRepository, NotificationRepository, RatingRepository, RepositoryError,
    TicketRepository, UserRepository,
};

/// In-memory user repository. Keeps insertion order so agent enumeration is stable.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read().clone())
    }

    async fn list_agents(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read().iter().filter(|u| u.is_agent()).cloned().collect())
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(RepositoryError::DuplicateKey(user.email.clone()));
        }
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }
}

/// In-memory category repository
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        Ok(self.categories.read().iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.read().clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.categories.read().len())
    }

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError> {
        let mut categories = self.categories.write();
        if categories.iter().any(|c| c.id == category.id) {
            return Err(RepositoryError::DuplicateKey(category.id.value().to_string()));
        }
        categories.push(category.clone());
        Ok(())
    }

    async fn save(&self, category: &Category) -> Result<(), RepositoryError> {
        let mut categories = self.categories.write();
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category.clone(),
            None => categories.push(category.clone()),
        }
        Ok(())
    }
}

/// In-memory ticket repository
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: RwLock<Vec<Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.tickets.read().iter().find(|t| t.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(self.tickets.read().clone())
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError> {
        let mut tickets = self.tickets.write();
        match tickets.iter_mut().find(|t| t.id() == ticket.id()) {
            Some(existing) => *existing = ticket.clone(),
            None => tickets.push(ticket.clone()),
        }
        Ok(())
    }
}

/// In-memory chat repository, keyed by ticket
#[derive(Default)]
pub struct InMemoryChatRepository {
    chats: DashMap<EntityId, ChatLog>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn find_by_ticket(&self, ticket_id: &EntityId) -> Result<Option<ChatLog>, RepositoryError> {
        Ok(self.chats.get(ticket_id).map(|c| c.clone()))
    }

    async fn save(&self, chat: &ChatLog) -> Result<(), RepositoryError> {
        self.chats.insert(chat.ticket_id, chat.clone());
        Ok(())
    }
}

/// In-memory notification repository. Insertion order breaks timestamp ties.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.notifications.write().push(notification.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &EntityId, limit: usize) -> Result<Vec<Notification>, RepositoryError> {
        let mut found: Vec<Notification> = self.notifications
            .read()
            .iter()
            .rev()
            .filter(|n| &n.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);
        Ok(found)
    }

    async fn mark_read(&self, id: &EntityId, user_id: &EntityId) -> Result<bool, RepositoryError> {
        match self.notifications.write().iter_mut().find(|n| &n.id == id) {
            Some(n) if &n.user_id == user_id => {
                n.read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// In-memory rating repository, grouped by agent
#[derive(Default)]
pub struct InMemoryRatingRepository {
    ratings: DashMap<EntityId, Vec<RatingRecord>>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratings submitted for one agent, oldest first
    pub fn for_agent(&self, agent_id: &EntityId) -> Vec<RatingRecord> {
        self.ratings.get(agent_id).map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn insert(&self, rating: &RatingRecord) -> Result<(), RepositoryError> {
        self.ratings.entry(rating.agent_id).or_default().push(rating.clone());
        Ok(())
    }
}
