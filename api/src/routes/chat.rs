//! Per-ticket chat

use axum::{Router, Json, extract::State, http::StatusCode};
use axum::routing::{get, post};
use quickdesk_support::application::dto::ChatView;
use quickdesk_support::{ChatMessage, EntityId};
use std::sync::Arc;

use crate::extract::{JsonBody, PathParam};
use crate::middleware::{AuthUser, Permission};
use crate::{ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/:ticket_id", get(get_chat))
        .route("/:ticket_id/message", post(post_message))
}

/// Conversation for a ticket, with the ticket and assigned agent name
#[utoipa::path(
    get,
    path = "/api/chat/{ticket_id}",
    params(("ticket_id" = EntityId, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Chat log", body = ChatView),
        (status = 403, description = "Not a participant", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "chat"
)]
pub async fn get_chat(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    PathParam(ticket_id): PathParam<EntityId>,
) -> ApiResult<Json<ApiResponse<ChatView>>> {
    auth.require(Permission::ChatParticipate)?;
    Ok(Json(ApiResponse::success(state.chat.get_chat(&ticket_id, &auth.actor()).await?)))
}

/// Post a message; the first one moves an open ticket to in-progress
#[utoipa::path(
    post,
    path = "/api/chat/{ticket_id}/message",
    params(("ticket_id" = EntityId, Path, description = "Ticket ID")),
    request_body = MessageRequest,
    responses(
        (status = 201, description = "Message stored", body = ChatMessage),
        (status = 400, description = "Empty message", body = ErrorResponse),
        (status = 403, description = "Not a participant", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "chat"
)]
pub async fn post_message(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    PathParam(ticket_id): PathParam<EntityId>,
    JsonBody(input): JsonBody<MessageRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ChatMessage>>)> {
    auth.require(Permission::ChatParticipate)?;
    let message = state.chat.post_message(&ticket_id, &auth.actor(), &input.content).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(message))))
}
