//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Handle GET /healthz.
///
/// Reports healthy when the documents root can be listed.
pub(crate) async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match tokio::fs::read_dir(&state.docs_root).await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(
                path = %state.docs_root.display(),
                error = %e,
                "Health check failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "documents root unavailable")
        }
    }
}
