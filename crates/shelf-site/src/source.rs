//! Backends that produce a fresh section list.

use std::path::Path;

use shelf_storage_fs::{ScanError, Scanner, Section};

/// Producer of a complete, ordered section list.
///
/// [`Site`](crate::Site) calls [`scan`](Self::scan) at most once at a time
/// and only when its cached list has expired.
pub trait SectionSource: Send + Sync {
    /// Build the section list from scratch.
    fn scan(&self) -> Result<Vec<Section>, ScanError>;

    /// Documents root the sections are built from.
    fn root(&self) -> &Path;
}

impl SectionSource for Scanner {
    fn scan(&self) -> Result<Vec<Section>, ScanError> {
        Scanner::scan(self)
    }

    fn root(&self) -> &Path {
        Scanner::root(self)
    }
}
