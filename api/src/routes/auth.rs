//! Registration and login

use axum::{Router, Json, extract::State, http::StatusCode};
use axum::routing::post;
use quickdesk_support::application::dto::RegisterUserCommand;
use quickdesk_support::{Role, SupportError};
use std::sync::Arc;

use crate::extract::JsonBody;
use crate::middleware::auth::create_token;
use crate::password::{hash_password, verify_password};
use crate::{ApiError, ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create an account and issue a token
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse),
        (status = 403, description = "Admin role without a valid admin key", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    if input.username.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".into()));
    }

    let role = input.role.unwrap_or_default();
    if role == Role::Admin {
        let key_ok = input.admin_key.as_deref().is_some_and(|key| state.config.is_admin_key(key));
        if !key_ok {
            tracing::warn!(email = %input.email, "admin registration with invalid key");
            return Err(ApiError::Forbidden("Invalid admin key".into()));
        }
    }

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(SupportError::UserExists.into());
    }

    let user = state
        .users
        .register(RegisterUserCommand {
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role,
            specializations: input.specializations,
        })
        .await?;

    let token = create_token(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(AuthResponse { token, user }))))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".into()));
    }

    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .filter(|user| verify_password(&input.password, &user.password_hash))
        .ok_or(ApiError::InvalidCredentials)?;

    let token = create_token(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(ApiResponse::success(AuthResponse { token, user })))
}
