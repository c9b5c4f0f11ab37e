//! Time-bounded memoization of the section index.
//!
//! # Thread Safety
//!
//! `Site` is designed for concurrent access:
//! - `sections()` on a fresh cache takes only a shared lock and an `Arc` clone
//! - An expired cache is refreshed under the exclusive lock with a second
//!   freshness check, so at most one scan runs at a time and callers queued
//!   behind a refresh reuse its result
//! - The `(timestamp, list)` pair is replaced as a whole; readers never see a
//!   partially updated list

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use shelf_storage_fs::{DOCS_BASE, GENERAL_SECTION, ScanError, Scanner, Section};

use crate::source::SectionSource;

/// Default time a scan result stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Configuration for [`Site::from_root`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Maximum age of a cached scan. Zero disables caching.
    pub ttl: Duration,
    /// Label of the section holding root-level files.
    pub general_label: String,
    /// URL prefix documents are served under.
    pub docs_base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            general_label: GENERAL_SECTION.to_owned(),
            docs_base: DOCS_BASE.to_owned(),
        }
    }
}

/// Published scan result.
#[derive(Debug)]
struct Snapshot {
    sections: Arc<[Section]>,
    refreshed_at: Instant,
}

/// Section index with TTL caching.
///
/// Wraps a [`SectionSource`] and rescans only when the last successful scan
/// is older than the TTL. A failed scan leaves the previous list in place and
/// keeps the cache stale, so the next caller retries.
pub struct Site {
    source: Arc<dyn SectionSource>,
    ttl: Duration,
    state: RwLock<Option<Snapshot>>,
}

impl Site {
    /// Create a site over `source` with the given TTL.
    #[must_use]
    pub fn new(source: Arc<dyn SectionSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(None),
        }
    }

    /// Create a site scanning `root` with a filesystem [`Scanner`].
    #[must_use]
    pub fn from_root(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        let scanner = Scanner::new(root)
            .with_general_label(config.general_label)
            .with_docs_base(config.docs_base);
        Self::new(Arc::new(scanner), config.ttl)
    }

    /// Documents root behind this site.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.source.root()
    }

    /// Configured cache TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current section list, rescanning if the cache has expired.
    ///
    /// The returned list is shared with other callers and must be treated as
    /// read-only.
    ///
    /// # Errors
    ///
    /// Returns the scan error if a refresh was needed and failed. The cache
    /// is left untouched in that case.
    pub fn sections(&self) -> Result<Arc<[Section]>, ScanError> {
        // Fast path: shared lock only
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(sections) = self.fresh(&state) {
                return Ok(sections);
            }
        }

        // Slow path: exclusive lock
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        // Double-check: another caller may have refreshed while we waited
        if let Some(sections) = self.fresh(&state) {
            return Ok(sections);
        }

        let started = Instant::now();
        let sections: Arc<[Section]> = match self.source.scan() {
            Ok(sections) => sections.into(),
            Err(e) => {
                tracing::error!(error = %e, "Section refresh failed, keeping previous index");
                return Err(e);
            }
        };

        *state = Some(Snapshot {
            sections: Arc::clone(&sections),
            refreshed_at: Instant::now(),
        });
        tracing::info!(
            sections = sections.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Section index refreshed"
        );

        Ok(sections)
    }

    /// Last successfully scanned list regardless of its age.
    ///
    /// Never triggers a scan. Returns `None` until the first successful scan.
    #[must_use]
    pub fn last_sections(&self) -> Option<Arc<[Section]>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.as_ref().map(|s| Arc::clone(&s.sections))
    }

    /// Cached list if one exists and is younger than the TTL.
    fn fresh(&self, state: &Option<Snapshot>) -> Option<Arc<[Section]>> {
        state
            .as_ref()
            .filter(|s| s.refreshed_at.elapsed() < self.ttl)
            .map(|s| Arc::clone(&s.sections))
    }
}
