//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shelf_site::ScanError;

/// Body sent when the section index cannot be produced.
const LOAD_FAILED: &str = "Could not load documents";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The documents root could not be scanned.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// The blocking scan task panicked or was cancelled.
    #[error("Scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error getting sections");
        (StatusCode::INTERNAL_SERVER_ERROR, LOAD_FAILED).into_response()
    }
}
