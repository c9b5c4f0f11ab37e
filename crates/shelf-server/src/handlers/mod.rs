//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod index;
pub(crate) mod sections;

use std::sync::Arc;

use shelf_site::Section;

use crate::error::ServerError;
use crate::state::AppState;

/// Fetch the section index off the async runtime.
///
/// A refresh walks the filesystem, so the call runs on the blocking pool.
pub(crate) async fn load_sections(state: &AppState) -> Result<Arc<[Section]>, ServerError> {
    let site = Arc::clone(&state.site);
    let sections = tokio::task::spawn_blocking(move || site.sections()).await??;
    Ok(sections)
}
