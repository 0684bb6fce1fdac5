//! Agent ratings and profiles

use axum::{Router, Json, extract::State};
use axum::routing::{get, post, put};
use quickdesk_support::application::dto::RatingOutcome;
use quickdesk_support::{EntityId, User};
use std::sync::Arc;

use crate::extract::{JsonBody, PathParam};
use crate::middleware::{AuthUser, Permission};
use crate::{ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/:agent_id/rate", post(rate_agent))
        .route("/:agent_id/profile", get(get_profile))
        .route("/:agent_id/specializations", put(update_specializations))
}

/// Rate an agent from 1 to 5
#[utoipa::path(
    post,
    path = "/api/agents/{agent_id}/rate",
    params(("agent_id" = EntityId, Path, description = "Agent ID")),
    request_body = RateRequest,
    responses(
        (status = 200, description = "New running average", body = RatingOutcome),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    tag = "agents"
)]
pub async fn rate_agent(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    PathParam(agent_id): PathParam<EntityId>,
    JsonBody(input): JsonBody<RateRequest>,
) -> ApiResult<Json<ApiResponse<RatingOutcome>>> {
    auth.require(Permission::AgentsRate)?;
    let outcome = state.agents.rate(&agent_id, &auth.actor(), input.rating, input.comment).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// Agent profile
#[utoipa::path(
    get,
    path = "/api/agents/{agent_id}/profile",
    params(("agent_id" = EntityId, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Agent account and profile", body = User),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    tag = "agents"
)]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
    PathParam(agent_id): PathParam<EntityId>,
) -> ApiResult<Json<ApiResponse<User>>> {
    Ok(Json(ApiResponse::success(state.agents.profile(&agent_id).await?)))
}

/// Replace an agent's specialization tags (the agent or an admin)
#[utoipa::path(
    put,
    path = "/api/agents/{agent_id}/specializations",
    params(("agent_id" = EntityId, Path, description = "Agent ID")),
    request_body = SpecializationsRequest,
    responses(
        (status = 200, description = "Updated agent", body = User),
        (status = 403, description = "Not this agent or an admin", body = ErrorResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    ),
    tag = "agents"
)]
pub async fn update_specializations(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    PathParam(agent_id): PathParam<EntityId>,
    JsonBody(input): JsonBody<SpecializationsRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let agent = state
        .agents
        .set_specializations(&agent_id, &auth.actor(), input.specializations)
        .await?;
    tracing::info!(%agent_id, tags = ?agent.specializations, "specializations updated");
    Ok(Json(ApiResponse::success(agent)))
}
