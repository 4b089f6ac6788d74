//! Error types and response handling for the proxy server.
//!
//! Provides HTTP status code mapping and JSON error bodies.

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur during proxy operations.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The service credential is missing.
    #[error("Service not configured: {reason}")]
    NotConfigured { reason: String },

    /// Client did not present the proxy access token.
    #[error("Missing or invalid access token")]
    Unauthorized,

    /// Failed to connect to the text-generation service.
    #[error("Connection to '{base_url}' failed: {source}")]
    ConnectionError {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout.
    #[error("Request timeout after {duration}s")]
    RequestTimeout { duration: u64 },

    /// Invalid request format or parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Could not bind or accept on the listening socket.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Map error variant to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NotConfigured { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Unauthorized => StatusCode::UNAUTHORIZED,
            ProxyError::ConnectionError { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::RequestTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error type string for JSON responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProxyError::NotConfigured { .. } => "not_configured",
            ProxyError::Unauthorized => "unauthorized",
            ProxyError::ConnectionError { .. } => "connection_error",
            ProxyError::RequestTimeout { .. } => "request_timeout",
            ProxyError::InvalidRequest(_) => "invalid_request",
            ProxyError::Io(_) => "io_error",
            ProxyError::Internal(_) => "internal_error",
        }
    }
}

/// Builder for standardized error responses.
pub struct ErrorResponse;

impl ErrorResponse {
    /// `{"error": {"type", "message", "request_id"}}` with the mapped status.
    pub fn from_error(err: &ProxyError, request_id: &str) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": err.error_type(),
                "message": err.to_string(),
                "request_id": request_id
            }
        });

        (
            err.status_code(),
            [(CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
