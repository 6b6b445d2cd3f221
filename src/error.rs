use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or incomplete client input.
    #[error("{0}")]
    BadRequest(String),

    /// Upload with an extension outside the accepted formats.
    #[error("File type {0} not allowed")]
    UnsupportedFormat(String),

    /// Request body over the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Resource not found error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// POST to a path that is not an API route.
    #[error("Unknown API endpoint")]
    UnknownEndpoint(String),

    /// Method other than GET, HEAD or POST.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else if let AppError::UnknownEndpoint(path) = &self {
            tracing::warn!(path = %path, "Unknown API endpoint");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;
