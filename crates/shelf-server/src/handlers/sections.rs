//! Sections API endpoint.
//!
//! Returns the same section index the home page shows.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use shelf_site::Section;

use crate::error::ServerError;
use crate::handlers::load_sections;
use crate::state::AppState;

/// Response for GET /api/sections.
#[derive(Serialize)]
pub(crate) struct SectionsResponse {
    /// Sections in display order.
    sections: Arc<[Section]>,
}

/// Handle GET /api/sections.
pub(crate) async fn get_sections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SectionsResponse>, ServerError> {
    let sections = load_sections(&state).await?;
    Ok(Json(SectionsResponse { sections }))
}
