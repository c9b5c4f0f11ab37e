//! Scan error type.

use std::io;
use std::path::{Path, PathBuf};

/// Error returned when a scan cannot run at all.
///
/// Problems with individual entries never surface here; they are reported
/// to the scanner's [`DiagnosticsSink`](crate::DiagnosticsSink) instead.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Root directory is missing, inaccessible, or not a directory.
    #[error("Documents root unavailable: {} ({source})", .path.display())]
    RootUnavailable {
        /// Root directory that was checked.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Create a root unavailability error.
    #[must_use]
    pub fn root_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RootUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Root directory the failed scan was pointed at.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::RootUnavailable { path, .. } => path,
        }
    }

    /// I/O error kind behind the failure.
    #[must_use]
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::RootUnavailable { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path_and_cause() {
        let err = ScanError::root_unavailable(
            "/srv/docs",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/srv/docs"), "{msg}");
        assert!(msg.contains("no such directory"), "{msg}");
        assert_eq!(err.io_kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), Path::new("/srv/docs"));
    }
}
