//! Section index data model.

/// Default label of the section holding files directly under the root.
pub const GENERAL_SECTION: &str = "General";

/// A servable document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    /// File base name, case preserved (e.g. "Hiring Policy.pdf").
    pub name: String,
    /// Absolute request path serving the file (e.g. "/docs/HR/hiring.pdf").
    pub url: String,
}

/// A named group of documents plus an optional README narrative.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    /// General label for root files, otherwise the directory's
    /// root-relative path with forward slashes (e.g. "HR/2025").
    pub name: String,
    /// Documents sorted by case-insensitive name.
    pub documents: Vec<Document>,
    /// Rendered README HTML, empty when the directory has none.
    pub readme: String,
}

impl Section {
    /// True if the section carries a rendered narrative.
    #[must_use]
    pub fn has_readme(&self) -> bool {
        !self.readme.is_empty()
    }

    /// True if the section would be visible in the index.
    #[must_use]
    pub(crate) fn is_visible(&self) -> bool {
        !self.documents.is_empty() || self.has_readme()
    }
}

/// Sort documents ascending by case-insensitive name.
///
/// Names differing only in case fall back to byte order so the result is
/// deterministic.
pub(crate) fn sort_documents(documents: &mut [Document]) {
    documents.sort_by_cached_key(|d| (d.name.to_lowercase(), d.name.clone()));
}
