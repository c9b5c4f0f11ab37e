//! README narrative renderer for Shelf.
//!
//! Turns the raw markdown of a directory's `README.md` into HTML that is safe
//! to embed in the section index page:
//!
//! - Relative link and image destinations are rebased onto the document
//!   serving URL space (`/docs/<section>/<reference>`)
//! - Raw HTML inside the markdown is omitted
//! - Script-capable URL schemes are blanked
//! - Input that cannot be rendered degrades to escaped plain text
//!
//! # Example
//!
//! ```
//! use shelf_renderer::render_narrative;
//!
//! let html = render_narrative(b"![Org chart](chart.png)", "HR/2025");
//! assert!(html.contains(r#"src="/docs/HR/2025/chart.png""#));
//! ```

mod escape;
mod link;
mod narrative;

pub use escape::escape_html;
pub use link::{ReferenceKind, classify_reference, rebase_reference};
pub use narrative::{NarrativeRenderer, render_narrative};

/// URL prefix under which document bytes are served.
pub const DOCS_BASE: &str = "/docs";
