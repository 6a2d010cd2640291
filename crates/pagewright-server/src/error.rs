//! Error types for the documentation server.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    /// Document read, frontmatter or compile failure.
    #[error("Render error: {0}")]
    Render(#[from] pagewright_static::RenderError),

    #[error("Template error: {0}")]
    Template(String),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let status = match &self {
            Self::InvalidAddress(_) | Self::BindError(..) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}
