//! Per-ticket chat log
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::aggregates::Role;
use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ChatLog {
    pub ticket_id: EntityId,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ChatMessage {
    pub id: EntityId,
    pub content: String,
    pub sender: EntityId,
    pub sender_name: String,
    pub sender_role: Role,
    pub timestamp: DateTime<Utc>,
}

impl ChatLog {
    pub fn new(ticket_id: EntityId) -> Self {
        let now = Utc::now();
        Self { ticket_id, messages: vec![], created_at: now, updated_at: now }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.updated_at = message.timestamp;
        self.messages.push(message);
    }
}

impl ChatMessage {
    pub fn new(sender: EntityId, sender_name: impl Into<String>, sender_role: Role, content: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            content: content.into(),
            sender,
            sender_name: sender_name.into(),
            sender_role,
            timestamp: Utc::now(),
        }
    }
}
