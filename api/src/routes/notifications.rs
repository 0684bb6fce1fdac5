//! In-app notifications

use axum::{Router, Json, extract::State};
use axum::routing::{get, put};
use quickdesk_support::{EntityId, Notification};
use std::sync::Arc;

use crate::extract::PathParam;
use crate::middleware::AuthUser;
use crate::{ApiError, ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id/read", put(mark_read))
}

/// The caller's 50 most recent notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Notification>>>> {
    Ok(Json(ApiResponse::success(state.notifications.list_for(&auth.id()).await?)))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = EntityId, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 404, description = "No such notification for this user", body = ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn mark_read(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    PathParam(id): PathParam<EntityId>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    if !state.notifications.mark_read(&id, &auth.id()).await? {
        return Err(ApiError::NotFound("Notification not found".into()));
    }
    Ok(Json(ApiResponse::success(MessageResponse::new("Notification marked as read"))))
}
