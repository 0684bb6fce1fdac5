//! Ticket endpoints

use axum::{
    Router, Json,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
};
use axum::routing::{get, post};
use quickdesk_support::application::dto::{
    CreateTicketCommand, TicketCreated, TicketPage, TicketQuery, TicketSort, UpdateTicketCommand,
};
use quickdesk_support::{CategoryId, Comment, EntityId, Ticket, TicketStatus};
use std::path::Path as FsPath;
use std::sync::Arc;

use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::AuthUser;
use crate::{ApiError, ApiResult, ApiState, models::*};

/// Largest accepted ticket body, attachment included
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/my", get(my_tickets))
        .route("/:id", get(get_ticket).put(update_ticket))
        .route("/:id/comments", post(add_comment))
        .route("/:id/vote", post(vote))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn ticket_query(params: TicketListParams, created_by: Option<EntityId>) -> ApiResult<TicketQuery> {
    let status = non_empty(params.status)
        .map(|s| s.parse::<TicketStatus>())
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let category = non_empty(params.category)
        .filter(|c| c != "all")
        .map(|c| c.trim().parse::<i64>().map(CategoryId::new))
        .transpose()
        .map_err(|_| ApiError::BadRequest("category must be a number".into()))?;
    let sort = non_empty(params.sort)
        .map(|s| s.parse::<TicketSort>())
        .transpose()
        .map_err(ApiError::BadRequest)?
        .unwrap_or_default();

    Ok(TicketQuery {
        page: params.page.unwrap_or(1).max(1),
        search: non_empty(params.search),
        status,
        category,
        sort,
        created_by,
    })
}

/// List tickets
#[utoipa::path(
    get,
    path = "/api/tickets",
    params(TicketListParams),
    responses(
        (status = 200, description = "One page of tickets", body = TicketPage),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn list_tickets(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
    QueryParams(params): QueryParams<TicketListParams>,
) -> ApiResult<Json<ApiResponse<TicketPage>>> {
    let page = state.tickets.list_tickets(&ticket_query(params, None)?).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// List the caller's own tickets
#[utoipa::path(
    get,
    path = "/api/tickets/my",
    params(TicketListParams),
    responses(
        (status = 200, description = "One page of the caller's tickets", body = TicketPage)
    ),
    tag = "tickets"
)]
pub async fn my_tickets(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    QueryParams(params): QueryParams<TicketListParams>,
) -> ApiResult<Json<ApiResponse<TicketPage>>> {
    let page = state.tickets.list_tickets(&ticket_query(params, Some(auth.id()))?).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Fields of a ticket submission, from either JSON or a multipart form.
struct TicketForm {
    subject: String,
    description: String,
    category_id: i64,
    attachment: Option<String>,
}

/// Create a ticket and route it to the best-matching agent
///
/// Accepts `application/json` or `multipart/form-data` with an optional
/// `attachment` file part.
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = TicketCreated),
        (status = 400, description = "Missing fields", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn create_ticket(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    request: Request,
) -> ApiResult<(StatusCode, Json<ApiResponse<TicketCreated>>)> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let form = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        read_ticket_form(multipart, &state.config.upload_dir).await?
    } else {
        let JsonBody(body) = JsonBody::<CreateTicketRequest>::from_request(request, &state).await?;
        TicketForm {
            subject: body.subject,
            description: body.description,
            category_id: body.category_id,
            attachment: None,
        }
    };

    let created = state
        .tickets
        .create_ticket(CreateTicketCommand {
            subject: form.subject,
            description: form.description,
            category_id: CategoryId::new(form.category_id),
            created_by: auth.id(),
            attachment: form.attachment,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

async fn read_ticket_form(mut multipart: Multipart, upload_dir: &FsPath) -> ApiResult<TicketForm> {
    let bad = |e: axum::extract::multipart::MultipartError| ApiError::BadRequest(e.body_text());

    let mut subject = String::new();
    let mut description = String::new();
    let mut category_id = None;
    let mut attachment = None;

    while let Some(field) = multipart.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "subject" => subject = field.text().await.map_err(bad)?,
            "description" => description = field.text().await.map_err(bad)?,
            "category_id" | "categoryId" => {
                let raw = field.text().await.map_err(bad)?;
                let id = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ApiError::BadRequest("category_id must be a number".into()))?;
                category_id = Some(id);
            }
            "attachment" => {
                let original = field.file_name().and_then(base_name);
                let bytes = field.bytes().await.map_err(bad)?;
                if let Some(original) = original.filter(|_| !bytes.is_empty()) {
                    attachment = Some(store_upload(upload_dir, &original, &bytes).await?);
                }
            }
            _ => {}
        }
    }

    let category_id = category_id.ok_or_else(|| ApiError::BadRequest("category_id is required".into()))?;
    Ok(TicketForm { subject, description, category_id, attachment })
}

/// Strip any client-supplied directory components.
fn base_name(name: &str) -> Option<String> {
    FsPath::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Write an attachment as `<millis>-<name>` and return the stored name.
async fn store_upload(dir: &FsPath, original: &str, bytes: &[u8]) -> ApiResult<String> {
    let stored = format!("{}-{}", chrono::Utc::now().timestamp_millis(), original);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("cannot create upload dir: {e}")))?;
    tokio::fs::write(dir.join(&stored), bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("cannot store attachment: {e}")))?;
    tracing::debug!(file = %stored, size = bytes.len(), "attachment stored");
    Ok(stored)
}

/// Get ticket by ID
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(("id" = EntityId, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket details", body = Ticket),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn get_ticket(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
    PathParam(id): PathParam<EntityId>,
) -> ApiResult<Json<ApiResponse<Ticket>>> {
    Ok(Json(ApiResponse::success(state.tickets.get_ticket(&id).await?)))
}

/// Change status or assignee by hand
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    params(("id" = EntityId, Path, description = "Ticket ID")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Updated ticket", body = Ticket),
        (status = 404, description = "Ticket or agent not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn update_ticket(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
    PathParam(id): PathParam<EntityId>,
    JsonBody(input): JsonBody<UpdateTicketRequest>,
) -> ApiResult<Json<ApiResponse<Ticket>>> {
    let status = non_empty(input.status)
        .map(|s| s.parse::<TicketStatus>())
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let assigned_to = non_empty(input.assigned_to)
        .map(|a| a.parse::<EntityId>())
        .transpose()
        .map_err(|_| ApiError::BadRequest("assigned_to must be a user id".into()))?;

    let ticket = state
        .tickets
        .update_ticket(&id, UpdateTicketCommand { status, assigned_to })
        .await?;
    Ok(Json(ApiResponse::success(ticket)))
}

/// Append a comment
#[utoipa::path(
    post,
    path = "/api/tickets/{id}/comments",
    params(("id" = EntityId, Path, description = "Ticket ID")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = Comment),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn add_comment(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    PathParam(id): PathParam<EntityId>,
    JsonBody(input): JsonBody<CommentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Comment>>)> {
    let comment = state.tickets.add_comment(&id, &input.content, &auth.actor()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

/// Up- or down-vote a ticket
#[utoipa::path(
    post,
    path = "/api/tickets/{id}/vote",
    params(("id" = EntityId, Path, description = "Ticket ID")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = Ticket),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn vote(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
    PathParam(id): PathParam<EntityId>,
    JsonBody(input): JsonBody<VoteRequest>,
) -> ApiResult<Json<ApiResponse<Ticket>>> {
    Ok(Json(ApiResponse::success(state.tickets.vote(&id, input.vote).await?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parsing() {
        let params = TicketListParams {
            page: Some(0),
            search: Some("  ".into()),
            status: Some("in-progress".into()),
            category: Some("3".into()),
            sort: Some("most-votes".into()),
        };
        let query = ticket_query(params, None).unwrap();
        assert_eq!(query.page, 1);
        assert!(query.search.is_none());
        assert_eq!(query.status, Some(TicketStatus::InProgress));
        assert_eq!(query.category, Some(CategoryId::new(3)));
        assert_eq!(query.sort, TicketSort::MostVotes);

        let all = TicketListParams { category: Some("all".into()), ..Default::default() };
        assert!(ticket_query(all, None).unwrap().category.is_none());

        let bad = TicketListParams { status: Some("closed".into()), ..Default::default() };
        assert!(ticket_query(bad, None).is_err());
    }

    #[test]
    fn test_base_name_strips_directories() {
        assert_eq!(base_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(base_name("report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(base_name(""), None);
    }
}
