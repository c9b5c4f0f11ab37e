//! Reporting of recoverable scan problems.
//!
//! The scanner never aborts on a single bad entry. It hands the problem to a
//! [`DiagnosticsSink`] and carries on, so the index degrades instead of
//! emptying.

use std::error::Error;
use std::path::Path;
use std::sync::Mutex;

/// A recoverable problem found during a scan.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// A file or directory could not be accessed during the walk.
    EntryAccess {
        /// Walker error, which carries the offending path when known.
        error: &'a (dyn Error + 'static),
    },
    /// A README could not be read; its section gets an empty narrative.
    NarrativeRead {
        /// README path.
        path: &'a Path,
        /// Read failure.
        error: &'a std::io::Error,
    },
}

/// Receiver for recoverable scan problems.
pub trait DiagnosticsSink: Send + Sync {
    /// Record a single problem.
    fn report(&self, diagnostic: Diagnostic<'_>);
}

/// Sink that forwards problems to `tracing` at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::EntryAccess { error } => {
                tracing::warn!(error = %error, "Skipping inaccessible entry");
            }
            Diagnostic::NarrativeRead { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "Failed to read README");
            }
        }
    }
}

/// Sink that keeps rendered problem messages in memory.
///
/// Useful for tests and for callers that want to show scan problems to the
/// user after the fact.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic<'_>) {
        let message = match diagnostic {
            Diagnostic::EntryAccess { error } => format!("entry: {error}"),
            Diagnostic::NarrativeRead { path, error } => {
                format!("readme {}: {error}", path.display())
            }
        };
        self.messages.lock().unwrap().push(message);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_collecting_diagnostics_records_messages() {
        let sink = CollectingDiagnostics::new();
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        sink.report(Diagnostic::NarrativeRead {
            path: Path::new("HR/README.md"),
            error: &err,
        });
        sink.report(Diagnostic::EntryAccess { error: &err });

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "readme HR/README.md: denied");
        assert_eq!(messages[1], "entry: denied");
    }
}
