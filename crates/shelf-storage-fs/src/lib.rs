//! Filesystem section scanner for Shelf.
//!
//! This crate provides [`Scanner`], which walks a documents root and builds
//! the section index shown on the Shelf home page. It handles:
//!
//! - Recursive directory walking that survives unreadable entries
//! - Grouping PDFs by their immediate containing directory
//! - README narrative rendering with link rebasing
//! - Deterministic ordering of sections and documents
//!
//! # Example
//!
//! ```no_run
//! use shelf_storage_fs::Scanner;
//!
//! # fn main() -> Result<(), shelf_storage_fs::ScanError> {
//! let sections = Scanner::new("docs").scan()?;
//! for section in &sections {
//!     println!("{}: {} documents", section.name, section.documents.len());
//! }
//! # Ok(())
//! # }
//! ```

mod diagnostics;
mod error;
mod scanner;
mod section;

use std::path::Path;

pub use diagnostics::{CollectingDiagnostics, Diagnostic, DiagnosticsSink, TracingDiagnostics};
pub use error::ScanError;
pub use scanner::Scanner;
pub use section::{Document, GENERAL_SECTION, Section};
pub use shelf_renderer::DOCS_BASE;

/// Scan `root` with default settings.
///
/// # Errors
///
/// Returns [`ScanError::RootUnavailable`] if `root` is missing or not a
/// directory.
pub fn scan(root: impl AsRef<Path>) -> Result<Vec<Section>, ScanError> {
    Scanner::new(root.as_ref()).scan()
}
