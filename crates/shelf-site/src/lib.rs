//! TTL-cached section index for Shelf.
//!
//! This crate provides:
//! - [`Site`]: the section index behind the home page, refreshed at most once
//!   per TTL window no matter how many requests arrive
//! - [`SectionSource`]: the seam between the cache and the scanner
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use shelf_site::{Site, SiteConfig};
//!
//! let config = SiteConfig {
//!     ttl: Duration::from_secs(60),
//!     ..SiteConfig::default()
//! };
//! let site = Site::from_root("docs", config);
//!
//! let sections = site.sections()?;
//! # Ok(())
//! # }
//! ```

mod site;
mod source;

pub use site::{DEFAULT_TTL, Site, SiteConfig};
pub use source::SectionSource;

// Re-export the data model for convenience
pub use shelf_storage_fs::{Document, ScanError, Section};
