//! Notification service

use std::sync::Arc;

use crate::domain::aggregates::{Notification, NotificationKind};
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::NotificationRepository;
use crate::Result;

/// Most recent notifications returned per listing
pub const NOTIFICATION_LIMIT: usize = 50;

pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    /// Fire-and-forget: delivery failures are logged, never returned.
    pub async fn notify(
        &self,
        user_id: EntityId,
        kind: NotificationKind,
        title: &str,
        message: String,
        data: serde_json::Value,
    ) {
        let notification = Notification::new(user_id, kind, title, message, data);
        if let Err(e) = self.repo.insert(&notification).await {
            tracing::error!(%user_id, ?kind, error = %e, "failed to store notification");
        }
    }

    pub async fn list_for(&self, user_id: &EntityId) -> Result<Vec<Notification>> {
        Ok(self.repo.find_by_user(user_id, NOTIFICATION_LIMIT).await?)
    }

    /// Unknown ids and other users' notifications are left untouched.
    pub async fn mark_read(&self, id: &EntityId, user_id: &EntityId) -> Result<bool> {
        Ok(self.repo.mark_read(id, user_id).await?)
    }
}
