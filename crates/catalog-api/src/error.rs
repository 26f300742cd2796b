//! # API Error Types
//!
//! Unified error handling for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_domain::DomainError;
use catalog_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON")]
    MalformedInput,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Conflict(String),

    #[error("CSRF verification failed")]
    CsrfRejected,

    #[error("Persistence error: {0}")]
    Persistence(PersistenceError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedInput => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::CsrfRejected => StatusCode::FORBIDDEN,
            Self::Persistence(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { .. } => Self::NotFound,
            PersistenceError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Persistence(other),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            // Same bare response the router gives unknown paths
            Self::NotFound => return status.into_response(),
            Self::Persistence(_) | Self::Template(_) => {
                tracing::error!(error = %self, "Request failed");
                let body = serde_json::json!({ "error": "Internal server error" });
                return (status, axum::Json(body)).into_response();
            }
            _ => {}
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
