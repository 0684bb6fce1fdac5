//! Ticket categories
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::CategoryId;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub specializations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// New categories start without specialization tags.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), specializations: vec![], created_at: Utc::now() }
    }

    pub fn with_specializations(mut self, tags: &[&str]) -> Self {
        self.specializations = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Categories seeded into an empty store.
    pub fn defaults() -> Vec<Category> {
        vec![
            Self::new(CategoryId::new(1), "Hardware Support")
                .with_specializations(&["printer", "computer", "laptop", "hardware", "repair"]),
            Self::new(CategoryId::new(2), "Software Support")
                .with_specializations(&["software", "application", "program", "installation"]),
            Self::new(CategoryId::new(3), "Network Support")
                .with_specializations(&["network", "internet", "wifi", "connection"]),
            Self::new(CategoryId::new(4), "Account Support")
                .with_specializations(&["account", "login", "password", "access"]),
            Self::new(CategoryId::new(5), "General Support")
                .with_specializations(&["general", "help", "support", "question"]),
        ]
    }
}
