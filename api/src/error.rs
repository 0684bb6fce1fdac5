//! API error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quickdesk_support::SupportError;
use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access token required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Support(#[from] SupportError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::InvalidToken => (StatusCode::FORBIDDEN, "INVALID_TOKEN"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
            Self::Support(e) => match e {
                SupportError::TicketNotFound
                | SupportError::AgentNotFound
                | SupportError::UserNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                SupportError::UserExists => (StatusCode::BAD_REQUEST, "USER_EXISTS"),
                SupportError::AccessDenied => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                SupportError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
                SupportError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            // Storage details stay in the log.
            Self::Internal(_) | Self::Support(SupportError::Storage(_)) => {
                tracing::error!(error = %self, "request failed");
                "Server error".to_string()
            }
            Self::Support(SupportError::Validation(msg)) => msg.clone(),
            other => other.to_string(),
        };
        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quickdesk_support::RepositoryError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::MissingToken, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidToken, StatusCode::FORBIDDEN),
            (SupportError::TicketNotFound.into(), StatusCode::NOT_FOUND),
            (SupportError::UserExists.into(), StatusCode::BAD_REQUEST),
            (SupportError::Validation("x".into()).into(), StatusCode::BAD_REQUEST),
            (
                SupportError::Storage(RepositoryError::ConnectionError("down".into())).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
