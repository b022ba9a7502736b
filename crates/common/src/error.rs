//! Common error types and the application-wide error boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Tollgate application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire shape of every error response: `{status, code, message}`
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub status: String,
    pub code: u16,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status_name(status),
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Build a JSON error response with the standard payload
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorPayload::new(status, message))).into_response()
}

/// Upper-snake enum name of an HTTP status, e.g. `BAD_REQUEST`.
///
/// Derived from the canonical reason phrase so it always agrees with `code`.
pub fn status_name(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join("_"),
        None => format!("STATUS_{}", status.as_u16()),
    }
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Authorization(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unexpected(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail stays in the server log
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Internal server error");
            "An error occurred while processing the request".to_string()
        } else {
            self.to_string()
        };

        error_response(status, message)
    }
}
