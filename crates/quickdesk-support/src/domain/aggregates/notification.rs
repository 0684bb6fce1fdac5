//! In-app notifications
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BestProviders,
    TicketAssigned,
    AgentResponse,
    UserResponse,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct Notification {
    pub id: EntityId,
    pub user_id: EntityId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: EntityId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EntityId::new(),
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            data,
            read: false,
            created_at: Utc::now(),
        }
    }
}
