//! User management endpoints

use axum::{Router, Json, extract::State};
use axum::routing::get;
use quickdesk_support::User;
use std::sync::Arc;

use crate::middleware::{AuthUser, Permission};
use crate::{ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(list_users))
}

/// List all users (admin only); password hashes are never serialized
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    auth.require(Permission::UsersRead)?;
    Ok(Json(ApiResponse::success(state.users.list().await?)))
}
