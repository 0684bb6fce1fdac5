//! Ticket application service
//!
//! Ticket creation runs the agent matcher, assigns the best candidate and
//! tells both the creator and the assigned agent about it.

use std::cmp::Reverse;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde_json::json;

use crate::application::dto::*;
use crate::application::NotificationService;
use crate::domain::aggregates::{Comment, NotificationKind, Role, Ticket, TicketStatus};
use crate::domain::services::{rank_agents, CandidateScore};
use crate::domain::value_objects::{CategoryId, EntityId, Vote};
use crate::ports::outbound::{CategoryRepository, Mailer, TicketRepository, UserRepository};
use crate::{Result, SupportError};

/// Tickets per listing page
pub const PAGE_SIZE: u32 = 10;
/// Candidates surfaced to the creator as best providers
pub const BEST_PROVIDER_COUNT: usize = 3;

pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    notifications: Arc<NotificationService>,
    mailer: Arc<dyn Mailer>,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        notifications: Arc<NotificationService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self { tickets, users, categories, notifications, mailer }
    }

    /// Rank agents for a ticket. Lookup failures yield an empty ranking.
    pub async fn rank_agents(&self, description: &str, category_id: CategoryId) -> Vec<CandidateScore> {
        let category = match self.categories.find_by_id(category_id).await {
            Ok(category) => category,
            Err(e) => {
                tracing::warn!(%category_id, error = %e, "category lookup failed, skipping agent matching");
                return vec![];
            }
        };
        let agents = match self.users.list_agents().await {
            Ok(agents) => agents,
            Err(e) => {
                tracing::warn!(error = %e, "agent enumeration failed, skipping agent matching");
                return vec![];
            }
        };
        rank_agents(description, category.as_ref(), &agents)
    }

    pub async fn create_ticket(&self, command: CreateTicketCommand) -> Result<TicketCreated> {
        if command.subject.trim().is_empty() || command.description.trim().is_empty() {
            return Err(SupportError::Validation("Subject and description are required".into()));
        }

        let candidates = self.rank_agents(&command.description, command.category_id).await;
        let assigned = candidates.first().map(|c| &c.agent);

        let mut ticket = Ticket::create(command.subject, command.description, command.category_id, command.created_by)
            .with_attachment(command.attachment);
        if let Some(agent) = assigned {
            ticket.auto_assign(agent);
        }
        self.tickets.save(&ticket).await?;

        tracing::info!(
            ticket_id = %ticket.id(),
            candidates = candidates.len(),
            assigned_to = ?ticket.assigned_to(),
            "ticket created"
        );

        let best_providers: Vec<ProviderSummary> =
            candidates.iter().take(BEST_PROVIDER_COUNT).map(ProviderSummary::from).collect();

        if !best_providers.is_empty() {
            self.notifications
                .notify(
                    command.created_by,
                    NotificationKind::BestProviders,
                    "Best Service Providers Found",
                    format!("We found {} expert agents for your request", best_providers.len()),
                    json!({ "ticket_id": ticket.id(), "agents": &best_providers }),
                )
                .await;
        }

        if let Some(agent) = assigned {
            if let Err(e) = self
                .mailer
                .send(&agent.email, "New Ticket Assigned", &format!("You have been assigned a new ticket: {}", ticket.subject()))
                .await
            {
                tracing::error!(agent_id = %agent.id, error = %e, "assignment email failed");
            }
            self.notifications
                .notify(
                    agent.id,
                    NotificationKind::TicketAssigned,
                    "New Ticket Assigned",
                    format!("You have been assigned ticket: {}", ticket.subject()),
                    json!({ "ticket_id": ticket.id() }),
                )
                .await;
        }

        Ok(TicketCreated { ticket, best_providers })
    }

    pub async fn get_ticket(&self, id: &EntityId) -> Result<Ticket> {
        self.tickets.find_by_id(id).await?.ok_or(SupportError::TicketNotFound)
    }

    /// Manual update. Independent of the matcher's assignment at creation.
    pub async fn update_ticket(&self, id: &EntityId, command: UpdateTicketCommand) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;
        if let Some(agent_id) = command.assigned_to {
            let agent = self
                .users
                .find_by_id(&agent_id)
                .await?
                .filter(|u| u.is_agent())
                .ok_or(SupportError::AgentNotFound)?;
            ticket.reassign(&agent);
        }
        if let Some(status) = command.status {
            ticket.set_status(status);
        }
        self.tickets.save(&ticket).await?;
        Ok(ticket)
    }

    pub async fn add_comment(&self, id: &EntityId, content: &str, author: &Actor) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(SupportError::Validation("Comment content is required".into()));
        }
        let mut ticket = self.get_ticket(id).await?;
        let comment = ticket.add_comment(content, author.id);
        self.tickets.save(&ticket).await?;
        Ok(comment)
    }

    pub async fn vote(&self, id: &EntityId, vote: Vote) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;
        ticket.vote(vote);
        self.tickets.save(&ticket).await?;
        Ok(ticket)
    }

    pub async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage> {
        let pattern = match query.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => Some(search_pattern(search)?),
            None => None,
        };

        let mut tickets: Vec<Ticket> = self
            .tickets
            .list()
            .await?
            .into_iter()
            .filter(|t| query.created_by.map_or(true, |id| t.created_by() == &id))
            .filter(|t| query.status.map_or(true, |s| t.status() == s))
            .filter(|t| query.category.map_or(true, |c| t.category_id() == c))
            .filter(|t| {
                pattern.as_ref().map_or(true, |re| re.is_match(t.subject()) || re.is_match(t.description()))
            })
            .collect();

        match query.sort {
            TicketSort::Recent => tickets.sort_by_key(|t| Reverse(t.created_at())),
            TicketSort::Oldest => tickets.sort_by_key(|t| t.created_at()),
            TicketSort::MostComments => tickets.sort_by_key(|t| Reverse(t.comments().len())),
            TicketSort::MostVotes => tickets.sort_by_key(|t| Reverse(t.upvotes())),
        }

        let total = tickets.len() as u64;
        let page = query.page.max(1);
        let skip = (page - 1).saturating_mul(PAGE_SIZE) as usize;
        let tickets = tickets.into_iter().skip(skip).take(PAGE_SIZE as usize).collect();

        Ok(TicketPage {
            tickets,
            total_pages: total.div_ceil(u64::from(PAGE_SIZE)) as u32,
            page,
            total_tickets: total,
        })
    }

    /// Users see their own tickets, agents the ones assigned to them, admins everything.
    pub async fn stats(&self, actor: &Actor) -> Result<TicketStats> {
        let visible: Vec<Ticket> = self
            .tickets
            .list()
            .await?
            .into_iter()
            .filter(|t| match actor.role {
                Role::User => t.created_by() == &actor.id,
                Role::Agent => t.assigned_to() == Some(&actor.id),
                Role::Admin => true,
            })
            .collect();

        let count = |status: TicketStatus| visible.iter().filter(|t| t.status() == status).count() as u64;
        Ok(TicketStats {
            total_tickets: visible.len() as u64,
            open_tickets: count(TicketStatus::Open),
            resolved_tickets: count(TicketStatus::Resolved),
        })
    }
}

/// Case-insensitive search. Patterns that fail to compile are matched literally.
fn search_pattern(search: &str) -> Result<Regex> {
    RegexBuilder::new(search)
        .case_insensitive(true)
        .build()
        .or_else(|_| RegexBuilder::new(&regex::escape(search)).case_insensitive(true).build())
        .map_err(|e| SupportError::Validation(format!("Invalid search: {e}")))
}
