//! API Models

use quickdesk_support::{Role, User, Vote};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Standard API response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Acknowledgement for updates that return no resource
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// ============ Auth ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(alias = "adminKey")]
    pub admin_key: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token plus the account it was issued for
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ============ Tickets ============

/// Listing filters; empty strings mean "no filter"
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketListParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Case-insensitive pattern over subject and description
    pub search: Option<String>,
    /// open, in-progress or resolved
    pub status: Option<String>,
    /// Category id
    pub category: Option<String>,
    /// recent, oldest, most-comments or most-votes
    pub sort: Option<String>,
}

/// JSON form of ticket creation; multipart uses the same field names
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    #[serde(alias = "categoryId")]
    pub category_id: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
    #[serde(alias = "assignedTo")]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteRequest {
    pub vote: Vote,
}

// ============ Categories ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryCreate {
    #[serde(default)]
    pub name: String,
}

// ============ Chat ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct MessageRequest {
    #[serde(default)]
    pub content: String,
}

// ============ Agents ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RateRequest {
    pub rating: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SpecializationsRequest {
    pub specializations: Vec<String>,
}
