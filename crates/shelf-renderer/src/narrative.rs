//! Markdown to HTML rendering for README narratives.

use std::panic::{self, AssertUnwindSafe};

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::DOCS_BASE;
use crate::escape::escape_html;
use crate::link::{ReferenceKind, classify_reference};

/// Replacement for raw HTML blocks found in a narrative.
const RAW_HTML_BLOCK_OMITTED: &str = "<!-- raw HTML omitted -->\n";

/// Replacement for inline raw HTML found in a narrative.
const RAW_HTML_INLINE_OMITTED: &str = "<!-- raw HTML omitted -->";

/// Renderer for directory README narratives.
///
/// Relative link and image destinations are rebased onto
/// `<docs_base>/<section_path>/`. Rendering never fails: input that is not
/// valid UTF-8, or that trips the markdown pipeline, comes back as escaped
/// plain text.
#[derive(Clone, Debug)]
pub struct NarrativeRenderer {
    docs_base: String,
    gfm: bool,
}

impl NarrativeRenderer {
    /// Create a renderer serving under [`DOCS_BASE`] with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            docs_base: DOCS_BASE.to_owned(),
            gfm: true,
        }
    }

    /// Override the document serving prefix (trailing slashes are dropped).
    #[must_use]
    pub fn with_docs_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.docs_base = base.trim_end_matches('/').to_owned();
        self
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// URL prefix that relative references in `section_path` resolve against.
    #[must_use]
    pub fn section_base(&self, section_path: &str) -> String {
        let section_path = section_path.trim_matches('/');
        if section_path.is_empty() {
            self.docs_base.clone()
        } else {
            format!("{}/{section_path}", self.docs_base)
        }
    }

    /// Render raw README bytes for the section at `section_path`.
    pub fn render(&self, content: &[u8], section_path: &str) -> String {
        let Ok(markdown) = std::str::from_utf8(content) else {
            return escape_html(&String::from_utf8_lossy(content));
        };

        panic::catch_unwind(AssertUnwindSafe(|| {
            self.render_markdown(markdown, section_path)
        }))
        .unwrap_or_else(|_| escape_html(markdown))
    }

    /// Render markdown text for the section at `section_path`.
    pub fn render_markdown(&self, markdown: &str, section_path: &str) -> String {
        let base = self.section_base(section_path);
        let events = Parser::new_ext(markdown, self.parser_options())
            .filter_map(|event| rewrite_event(event, &base));

        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut out, events);
        out
    }
}

impl Default for NarrativeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render README bytes with the default renderer.
pub fn render_narrative(content: &[u8], section_path: &str) -> String {
    NarrativeRenderer::new().render(content, section_path)
}

/// Rewrite link destinations and drop raw HTML.
///
/// Returns `None` for events that must not reach the output.
fn rewrite_event<'a>(event: Event<'a>, base: &str) -> Option<Event<'a>> {
    let event = match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: rebase_destination(dest_url, base),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: rebase_destination(dest_url, base),
            title,
            id,
        }),
        // Block contents arrive as `Html` events between the block tags.
        Event::Start(Tag::HtmlBlock) => Event::Html(CowStr::Borrowed(RAW_HTML_BLOCK_OMITTED)),
        Event::Html(_) => return None,
        Event::InlineHtml(_) => Event::InlineHtml(CowStr::Borrowed(RAW_HTML_INLINE_OMITTED)),
        other => other,
    };
    Some(event)
}

fn rebase_destination<'a>(dest: CowStr<'a>, base: &str) -> CowStr<'a> {
    match classify_reference(&dest) {
        ReferenceKind::Relative => CowStr::from(format!("{base}/{}", &*dest)),
        ReferenceKind::Unsafe => CowStr::Borrowed(""),
        ReferenceKind::Absolute | ReferenceKind::External | ReferenceKind::Inline => dest,
    }
}
