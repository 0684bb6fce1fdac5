//! Dashboard counters

use axum::{Router, Json, extract::State};
use axum::routing::get;
use quickdesk_support::application::dto::TicketStats;
use std::sync::Arc;

use crate::middleware::AuthUser;
use crate::{ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/stats", get(get_stats))
}

/// Ticket counts scoped to the caller: created tickets for users, assigned for agents, all for admins
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Ticket counts", body = TicketStats),
        (status = 401, description = "Missing token", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn get_stats(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<TicketStats>>> {
    let stats = state.tickets.stats(&auth.actor()).await?;
    Ok(Json(ApiResponse::success(stats)))
}
