//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use shelf_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Cached section index.
    pub(crate) site: Arc<Site>,
    /// Documents root, served under `/docs`.
    pub(crate) docs_root: PathBuf,
}
