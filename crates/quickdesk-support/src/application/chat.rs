//! Chat application service

use std::sync::Arc;

use serde_json::json;

use crate::application::dto::{Actor, ChatView};
use crate::application::NotificationService;
use crate::domain::aggregates::{ChatLog, ChatMessage, NotificationKind, Role, Ticket};
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{ChatRepository, TicketRepository};
use crate::{Result, SupportError};

pub struct ChatService {
    tickets: Arc<dyn TicketRepository>,
    chats: Arc<dyn ChatRepository>,
    notifications: Arc<NotificationService>,
}

impl ChatService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        chats: Arc<dyn ChatRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self { tickets, chats, notifications }
    }

    /// Load the conversation for a ticket, opening an empty one on first access.
    pub async fn get_chat(&self, ticket_id: &EntityId, actor: &Actor) -> Result<ChatView> {
        let ticket = self.accessible_ticket(ticket_id, actor).await?;
        let chat = self.load_or_open(ticket_id).await?;
        Ok(ChatView {
            agent: ticket.assigned_agent_name().map(str::to_string),
            ticket,
            chat: chat.messages,
        })
    }

    pub async fn post_message(&self, ticket_id: &EntityId, actor: &Actor, content: &str) -> Result<ChatMessage> {
        let content = content.trim();
        if content.is_empty() {
            return Err(SupportError::Validation("Message content is required".into()));
        }
        let mut ticket = self.accessible_ticket(ticket_id, actor).await?;

        let message = ChatMessage::new(actor.id, actor.name.clone(), actor.role, content);
        let mut chat = self.load_or_open(ticket_id).await?;
        chat.push(message.clone());
        self.chats.save(&chat).await?;

        if ticket.start_progress() {
            self.tickets.save(&ticket).await?;
            tracing::debug!(%ticket_id, "ticket moved to in-progress");
        }

        match actor.role {
            Role::Agent if ticket.created_by() != &actor.id => {
                self.notifications
                    .notify(
                        *ticket.created_by(),
                        NotificationKind::AgentResponse,
                        "Agent Response",
                        format!("{} responded to your ticket: {}", actor.name, ticket.subject()),
                        json!({ "ticket_id": ticket.id(), "agent_id": actor.id, "agent_name": actor.name }),
                    )
                    .await;
            }
            Role::User => {
                if let Some(agent_id) = ticket.assigned_to() {
                    self.notifications
                        .notify(
                            *agent_id,
                            NotificationKind::UserResponse,
                            "User Response",
                            format!("{} responded to ticket: {}", actor.name, ticket.subject()),
                            json!({ "ticket_id": ticket.id(), "user_id": actor.id, "user_name": actor.name }),
                        )
                        .await;
                }
            }
            _ => {}
        }

        Ok(message)
    }

    /// Users reach their own tickets, agents the ones assigned to them, admins any.
    async fn accessible_ticket(&self, ticket_id: &EntityId, actor: &Actor) -> Result<Ticket> {
        let ticket = self.tickets.find_by_id(ticket_id).await?.ok_or(SupportError::TicketNotFound)?;
        let allowed = match actor.role {
            Role::User => ticket.created_by() == &actor.id,
            Role::Agent => ticket.assigned_to() == Some(&actor.id),
            Role::Admin => true,
        };
        if allowed { Ok(ticket) } else { Err(SupportError::AccessDenied) }
    }

    async fn load_or_open(&self, ticket_id: &EntityId) -> Result<ChatLog> {
        match self.chats.find_by_ticket(ticket_id).await? {
            Some(chat) => Ok(chat),
            None => {
                let chat = ChatLog::new(*ticket_id);
                self.chats.save(&chat).await?;
                Ok(chat)
            }
        }
    }
}
