//! Section discovery by filesystem walking.
//!
//! The walk itself is unordered. Files are bucketed by their immediate
//! containing directory and the ordering is fixed at assembly time, so the
//! output does not depend on the order the OS returns directory entries in.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use ignore::WalkBuilder;
use shelf_renderer::{DOCS_BASE, NarrativeRenderer};

use crate::diagnostics::{Diagnostic, DiagnosticsSink, TracingDiagnostics};
use crate::error::ScanError;
use crate::section::{Document, GENERAL_SECTION, Section, sort_documents};

/// README file name, matched case-insensitively.
const README_NAME: &str = "readme.md";

/// Document extension, matched case-insensitively.
const PDF_SUFFIX: &str = ".pdf";

/// How a file participates in the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FileKind {
    Pdf,
    Readme,
    Other,
}

impl FileKind {
    fn of(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.ends_with(PDF_SUFFIX) {
            Self::Pdf
        } else if lower == README_NAME {
            Self::Readme
        } else {
            Self::Other
        }
    }
}

/// README chosen for a directory, read and rendered at assembly time.
#[derive(Debug)]
struct ReadmeRef {
    file_name: String,
    path: PathBuf,
}

/// Files collected for one directory below the root.
#[derive(Debug, Default)]
struct DirectoryBucket {
    documents: Vec<Document>,
    readme: Option<ReadmeRef>,
}

impl DirectoryBucket {
    /// Keep the lexicographically first README name among case variants.
    fn offer_readme(&mut self, file_name: String, path: PathBuf) {
        let replace = self
            .readme
            .as_ref()
            .is_none_or(|current| file_name < current.file_name);
        if replace {
            self.readme = Some(ReadmeRef { file_name, path });
        }
    }
}

/// Builds the section index for a documents root.
///
/// - PDFs directly under the root form the General section
/// - Every directory below the root with PDFs or a README forms its own
///   section, listing only its direct children
/// - Everything else is ignored
pub struct Scanner {
    root: PathBuf,
    general_label: String,
    docs_base: String,
    renderer: NarrativeRenderer,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Scanner {
    /// Create a scanner for `root` with default settings.
    ///
    /// Documents are served under [`DOCS_BASE`], root files are labelled
    /// [`GENERAL_SECTION`], and problems are logged through `tracing`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            general_label: GENERAL_SECTION.to_owned(),
            docs_base: DOCS_BASE.to_owned(),
            renderer: NarrativeRenderer::new(),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Set the label of the section holding root-level files.
    #[must_use]
    pub fn with_general_label(mut self, label: impl Into<String>) -> Self {
        self.general_label = label.into();
        self
    }

    /// Set the URL prefix documents and README references are served under.
    #[must_use]
    pub fn with_docs_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_owned();
        self.renderer = self.renderer.with_docs_base(base.clone());
        self.docs_base = base;
        self
    }

    /// Set the sink that receives recoverable scan problems.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Documents root this scanner walks.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root once and build the ordered section list.
    ///
    /// Returns `[General?, ...directory sections sorted by path]`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootUnavailable`] if the root cannot be statted
    /// or is not a directory. Every other problem is reported to the
    /// diagnostics sink and only degrades the affected section.
    pub fn scan(&self) -> Result<Vec<Section>, ScanError> {
        let started = Instant::now();
        self.check_root()?;

        let mut general = Vec::new();
        let mut buckets: BTreeMap<String, DirectoryBucket> = BTreeMap::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    self.diagnostics
                        .report(Diagnostic::EntryAccess { error: &err });
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(rel_path) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            self.collect_file(rel_path, entry.path(), &mut general, &mut buckets);
        }

        let sections = self.assemble(general, buckets);
        tracing::debug!(
            root = %self.root.display(),
            sections = sections.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Scanned documents root"
        );
        Ok(sections)
    }

    fn check_root(&self) -> Result<(), ScanError> {
        let metadata =
            fs::metadata(&self.root).map_err(|e| ScanError::root_unavailable(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::root_unavailable(
                &self.root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        Ok(())
    }

    /// Place one regular file into the General list or its directory bucket.
    fn collect_file(
        &self,
        rel_path: &Path,
        abs_path: &Path,
        general: &mut Vec<Document>,
        buckets: &mut BTreeMap<String, DirectoryBucket>,
    ) {
        let Some(file_name) = rel_path.file_name() else {
            return;
        };
        let file_name = file_name.to_string_lossy().into_owned();
        let kind = FileKind::of(&file_name);
        if kind == FileKind::Other {
            return;
        }

        let dir_rel = rel_path.parent().map(to_slash).unwrap_or_default();
        if dir_rel.is_empty() {
            if kind == FileKind::Pdf {
                general.push(Document {
                    url: format!("{}/{file_name}", self.docs_base),
                    name: file_name,
                });
            }
            return;
        }

        let bucket = buckets.entry(dir_rel).or_default();
        match kind {
            FileKind::Pdf => bucket.documents.push(Document {
                url: format!("{}/{}", self.docs_base, to_slash(rel_path)),
                name: file_name,
            }),
            FileKind::Readme => bucket.offer_readme(file_name, abs_path.to_path_buf()),
            FileKind::Other => {}
        }
    }

    fn assemble(
        &self,
        mut general: Vec<Document>,
        buckets: BTreeMap<String, DirectoryBucket>,
    ) -> Vec<Section> {
        let mut sections = Vec::with_capacity(buckets.len() + 1);

        if !general.is_empty() {
            sort_documents(&mut general);
            sections.push(Section {
                name: self.general_label.clone(),
                documents: general,
                readme: String::new(),
            });
        }

        // BTreeMap iteration yields directory keys in byte order.
        for (dir, bucket) in buckets {
            let readme = bucket
                .readme
                .map(|r| self.render_readme(&r.path, &dir))
                .unwrap_or_default();
            let mut section = Section {
                name: dir,
                documents: bucket.documents,
                readme,
            };
            if !section.is_visible() {
                continue;
            }
            sort_documents(&mut section.documents);
            sections.push(section);
        }

        sections
    }

    fn render_readme(&self, path: &Path, section_path: &str) -> String {
        match fs::read(path) {
            Ok(content) => self.renderer.render(&content, section_path),
            Err(error) => {
                self.diagnostics
                    .report(Diagnostic::NarrativeRead { path, error: &error });
                String::new()
            }
        }
    }
}

/// Join a relative path's normal components with forward slashes.
///
/// Examples:
/// - `HR` -> `"HR"`
/// - `HR/2025/plan.pdf` -> `"HR/2025/plan.pdf"` (regardless of host separator)
/// - empty path -> `""`
pub(crate) fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}
