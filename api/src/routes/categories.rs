//! Category endpoints

use axum::{Router, Json, extract::State, http::StatusCode};
use axum::routing::get;
use quickdesk_support::Category;
use std::sync::Arc;

use crate::extract::JsonBody;
use crate::middleware::{AuthUser, Permission};
use crate::{ApiResult, ApiState, models::*};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(list_categories).post(create_category))
}

/// List categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    Ok(Json(ApiResponse::success(state.categories.list().await?)))
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryCreate,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    JsonBody(input): JsonBody<CategoryCreate>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Category>>)> {
    auth.require(Permission::CategoriesWrite)?;
    let category = state.categories.create(&input.name).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "category created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))))
}
