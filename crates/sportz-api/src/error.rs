//! Sportz API — error types.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sportz_core::error::{DomainError, IssueCode, ValidationIssue};
use thiserror::Error;
use tracing::{debug, error};

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for validation failures.
#[derive(Debug, Serialize)]
pub struct ValidationErrorBody {
    /// Every issue found in the request.
    pub error: Vec<ValidationIssue>,
}

/// JSON body returned for all other error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Generic description of what failed.
    pub error: String,
    /// Diagnostic detail.
    pub details: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
///
/// `action` names the failed operation in 500 responses, e.g. "Failed to
/// create match".
#[derive(Debug)]
pub struct ApiError {
    /// The underlying domain failure.
    pub error: DomainError,
    /// Operation description used for store failures.
    pub action: &'static str,
}

impl ApiError {
    /// Returns a mapper that tags a `DomainError` with the failed operation.
    pub fn during(action: &'static str) -> impl FnOnce(DomainError) -> Self {
        move |error| Self { error, action }
    }

    /// Converts a JSON body rejection into a validation failure.
    #[must_use]
    pub fn from_json_rejection(rejection: &JsonRejection, action: &'static str) -> Self {
        Self {
            error: DomainError::Validation(vec![ValidationIssue::root(
                IssueCode::InvalidType,
                rejection.body_text(),
            )]),
            action,
        }
    }

    /// Converts a query-string rejection into a validation failure on
    /// `field`, the only parameter the route reads.
    #[must_use]
    pub fn from_query_rejection(
        rejection: &QueryRejection,
        field: &str,
        action: &'static str,
    ) -> Self {
        debug!(%field, reason = %rejection.body_text(), "rejected query string");
        Self {
            error: DomainError::Validation(vec![ValidationIssue::new(
                field,
                IssueCode::InvalidType,
                "Expected number, received nan",
            )]),
            action,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self {
            error,
            action: "Request failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = self.error.to_string();
        let (status, message) = match self.error {
            DomainError::Validation(issues) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody { error: issues }),
                )
                    .into_response();
            }
            DomainError::MatchNotFound(_) => (StatusCode::NOT_FOUND, "Match not found"),
            DomainError::InvalidTimeWindow(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Match has an invalid time window",
            ),
            DomainError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.action),
        };

        if status.is_server_error() {
            error!(action = self.action, %details, "request failed");
        }

        let body = ErrorBody {
            error: message.to_owned(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
