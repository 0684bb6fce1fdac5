//! Submitted agent ratings
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{EntityId, Score};

#[derive(Clone, Debug, Serialize)]
pub struct RatingRecord {
    pub id: EntityId,
    pub agent_id: EntityId,
    pub user_id: EntityId,
    pub rating: Score,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RatingRecord {
    pub fn new(agent_id: EntityId, user_id: EntityId, rating: Score, comment: Option<String>) -> Self {
        Self { id: EntityId::new(), agent_id, user_id, rating, comment, created_at: Utc::now() }
    }
}
