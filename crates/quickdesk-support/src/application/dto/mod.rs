//! Data Transfer Objects (DTOs)
//!
//! Commands in, views out.

use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::aggregates::{ChatMessage, Role, Ticket, TicketStatus};
use crate::domain::services::CandidateScore;
use crate::domain::value_objects::{CategoryId, EntityId};

/// The authenticated caller of a use case.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub role: Role,
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Clone, Debug)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub specializations: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct CreateTicketCommand {
    pub subject: String,
    pub description: String,
    pub category_id: CategoryId,
    pub created_by: EntityId,
    pub attachment: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct UpdateTicketCommand {
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<EntityId>,
}

/// Filters for ticket listings.
#[derive(Clone, Debug, Default)]
pub struct TicketQuery {
    /// 1-based page number
    pub page: u32,
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub category: Option<CategoryId>,
    pub sort: TicketSort,
    pub created_by: Option<EntityId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TicketSort {
    #[default]
    Recent,
    Oldest,
    MostComments,
    MostVotes,
}

impl FromStr for TicketSort {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(Self::Recent),
            "oldest" => Ok(Self::Oldest),
            "most-comments" => Ok(Self::MostComments),
            "most-votes" => Ok(Self::MostVotes),
            other => Err(format!("unknown sort: {other}")),
        }
    }
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// One of the best-matching agents, as shown to the ticket creator.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ProviderSummary {
    pub id: EntityId,
    pub name: String,
    pub rating: f64,
    pub specializations: Vec<String>,
    pub score: f64,
}

impl From<&CandidateScore> for ProviderSummary {
    fn from(c: &CandidateScore) -> Self {
        Self {
            id: c.agent.id,
            name: c.agent.username.clone(),
            rating: c.rating,
            specializations: c.specializations.clone(),
            score: c.score,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct TicketCreated {
    pub ticket: Ticket,
    pub best_providers: Vec<ProviderSummary>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    pub total_pages: u32,
    pub page: u32,
    pub total_tickets: u64,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct TicketStats {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub resolved_tickets: u64,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ChatView {
    pub ticket: Ticket,
    pub chat: Vec<ChatMessage>,
    pub agent: Option<String>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RatingOutcome {
    pub new_rating: f64,
    pub total_ratings: u32,
}
