//! QuickDesk REST API
//!
//! Axum front end over the help-desk services: bearer-token auth, ticket
//! routing with agent matching, chat, notifications and agent ratings.
//!
//! # Layout
//!
//! ```text
//! /health                      liveness
//! /api/register, /api/login    accounts and tokens
//! /api/tickets/...             tickets, comments, votes
//! /api/chat/...                per-ticket conversation
//! /api/notifications/...       in-app notifications
//! /api/agents/...              ratings, profiles, specializations
//! /api/categories, /api/users  admin-managed data
//! /docs                        Swagger UI
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use quickdesk_support::infrastructure::{
    InMemoryCategoryRepository, InMemoryChatRepository, InMemoryNotificationRepository,
    InMemoryRatingRepository, InMemoryTicketRepository, InMemoryUserRepository, LogMailer,
};
use quickdesk_support::{
    AgentService, CategoryService, ChatService, NotificationService, TicketService, UserService,
};

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use models::*;

/// API state
pub struct ApiState {
    pub config: ApiConfig,
    pub users: UserService,
    pub tickets: TicketService,
    pub chat: ChatService,
    pub notifications: Arc<NotificationService>,
    pub agents: AgentService,
    pub categories: CategoryService,
}

impl ApiState {
    /// Wire every service to the in-memory stores and the logging mailer.
    pub fn in_memory(config: ApiConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let tickets = Arc::new(InMemoryTicketRepository::new());
        let notifications = Arc::new(NotificationService::new(Arc::new(InMemoryNotificationRepository::new())));
        let mailer = Arc::new(LogMailer::new(config.mail_from.clone()));

        Self {
            users: UserService::new(users.clone()),
            tickets: TicketService::new(
                tickets.clone(),
                users.clone(),
                categories.clone(),
                notifications.clone(),
                mailer,
            ),
            chat: ChatService::new(tickets, Arc::new(InMemoryChatRepository::new()), notifications.clone()),
            agents: AgentService::new(users, Arc::new(InMemoryRatingRepository::new())),
            categories: CategoryService::new(categories),
            notifications,
            config,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QuickDesk API",
        version = "1.0.0",
        description = "Help-desk ticketing with automatic agent matching",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::auth::register,
        routes::auth::login,
        routes::stats::get_stats,
        routes::tickets::list_tickets,
        routes::tickets::my_tickets,
        routes::tickets::create_ticket,
        routes::tickets::get_ticket,
        routes::tickets::update_ticket,
        routes::tickets::add_comment,
        routes::tickets::vote,
        routes::categories::list_categories,
        routes::categories::create_category,
        routes::users::list_users,
        routes::chat::get_chat,
        routes::chat::post_message,
        routes::notifications::list_notifications,
        routes::notifications::mark_read,
        routes::agents::rate_agent,
        routes::agents::get_profile,
        routes::agents::update_specializations,
    ),
    components(
        schemas(
            ErrorResponse, MessageResponse,
            RegisterRequest, LoginRequest, AuthResponse,
            CreateTicketRequest, UpdateTicketRequest, CommentRequest, VoteRequest,
            CategoryCreate, MessageRequest, RateRequest, SpecializationsRequest,
            routes::health::HealthResponse,
            quickdesk_support::User, quickdesk_support::Role, quickdesk_support::AgentProfile,
            quickdesk_support::Ticket, quickdesk_support::TicketStatus, quickdesk_support::Comment,
            quickdesk_support::Category, quickdesk_support::ChatMessage,
            quickdesk_support::Notification, quickdesk_support::NotificationKind,
            quickdesk_support::EntityId, quickdesk_support::CategoryId, quickdesk_support::Vote,
            quickdesk_support::application::dto::TicketCreated,
            quickdesk_support::application::dto::ProviderSummary,
            quickdesk_support::application::dto::TicketPage,
            quickdesk_support::application::dto::TicketStats,
            quickdesk_support::application::dto::ChatView,
            quickdesk_support::application::dto::RatingOutcome,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "tickets", description = "Ticket routing and management"),
        (name = "categories", description = "Ticket categories"),
        (name = "users", description = "User management"),
        (name = "chat", description = "Per-ticket conversations"),
        (name = "notifications", description = "In-app notifications"),
        (name = "agents", description = "Agent ratings and profiles")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes());

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .merge(routes::auth::router())
        .merge(routes::stats::router())
        .nest("/tickets", routes::tickets::router())
        .nest("/categories", routes::categories::router())
        .nest("/users", routes::users::router())
        .nest("/chat", routes::chat::router())
        .nest("/notifications", routes::notifications::router())
        .nest("/agents", routes::agents::router())
}
