//! Ticket Aggregate
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::aggregates::User;
use crate::domain::value_objects::{CategoryId, EntityId, Vote};

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct Ticket {
    id: EntityId,
    subject: String,
    description: String,
    category_id: CategoryId,
    status: TicketStatus,
    created_by: EntityId,
    assigned_to: Option<EntityId>,
    assigned_agent_name: Option<String>,
    attachment: Option<String>,
    upvotes: u32,
    downvotes: u32,
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct Comment {
    pub id: EntityId,
    pub content: String,
    pub created_by: EntityId,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle: open → in-progress → resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus { #[default] Open, InProgress, Resolved }

impl FromStr for TicketStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

impl Ticket {
    pub fn create(
        subject: impl Into<String>,
        description: impl Into<String>,
        category_id: CategoryId,
        created_by: EntityId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(), subject: subject.into(), description: description.into(), category_id,
            status: TicketStatus::Open, created_by, assigned_to: None, assigned_agent_name: None,
            attachment: None, upvotes: 0, downvotes: 0, comments: vec![], created_at: now, updated_at: now,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<String>) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn subject(&self) -> &str { &self.subject }
    pub fn description(&self) -> &str { &self.description }
    pub fn category_id(&self) -> CategoryId { self.category_id }
    pub fn status(&self) -> TicketStatus { self.status }
    pub fn created_by(&self) -> &EntityId { &self.created_by }
    pub fn assigned_to(&self) -> Option<&EntityId> { self.assigned_to.as_ref() }
    pub fn assigned_agent_name(&self) -> Option<&str> { self.assigned_agent_name.as_deref() }
    pub fn attachment(&self) -> Option<&str> { self.attachment.as_deref() }
    pub fn upvotes(&self) -> u32 { self.upvotes }
    pub fn downvotes(&self) -> u32 { self.downvotes }
    pub fn comments(&self) -> &[Comment] { &self.comments }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    /// Record the matcher's pick. Only the first assignment sticks.
    pub fn auto_assign(&mut self, agent: &User) -> bool {
        if self.assigned_to.is_some() {
            return false;
        }
        self.assigned_to = Some(agent.id);
        self.assigned_agent_name = Some(agent.username.clone());
        self.touch();
        true
    }

    /// Manual reassignment from the update endpoint.
    pub fn reassign(&mut self, agent: &User) {
        self.assigned_to = Some(agent.id);
        self.assigned_agent_name = Some(agent.username.clone());
        self.touch();
    }

    pub fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
        self.touch();
    }

    /// The first chat message moves an open ticket into progress.
    pub fn start_progress(&mut self) -> bool {
        if self.status != TicketStatus::Open {
            return false;
        }
        self.set_status(TicketStatus::InProgress);
        true
    }

    pub fn add_comment(&mut self, content: impl Into<String>, author: EntityId) -> Comment {
        let comment = Comment { id: EntityId::new(), content: content.into(), created_by: author, created_at: Utc::now() };
        self.comments.push(comment.clone());
        self.touch();
        comment
    }

    pub fn vote(&mut self, vote: Vote) {
        match vote {
            Vote::Up => self.upvotes += 1,
            Vote::Down => self.downvotes += 1,
        }
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}
