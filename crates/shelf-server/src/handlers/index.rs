//! Home page listing every section.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use shelf_renderer::escape_html;
use shelf_site::Section;

use crate::error::ServerError;
use crate::handlers::load_sections;
use crate::state::AppState;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Documents</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
section { border-top: 1px solid #ddd; padding: 1rem 0; }
.readme img { max-width: 100%; }
ul.documents { padding-left: 1.25rem; }
</style>
</head>
<body>
<h1>Documents</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Characters left unescaped in a URL path segment (RFC 3986 unreserved).
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Handle GET /.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let sections = load_sections(&state).await?;
    Ok(Html(render_page(&sections)))
}

/// Render the full page for `sections`.
fn render_page(sections: &[Section]) -> String {
    let mut out = String::with_capacity(PAGE_HEAD.len() + sections.len() * 512);
    out.push_str(PAGE_HEAD);

    if sections.is_empty() {
        out.push_str("<p class=\"empty\">No documents found.</p>\n");
    }
    for section in sections {
        render_section(&mut out, section);
    }

    out.push_str(PAGE_TAIL);
    out
}

fn render_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "<section>\n<h2>{}</h2>", escape_html(&section.name));

    // Narrative HTML is already sanitized by the renderer
    if section.has_readme() {
        let _ = writeln!(out, "<div class=\"readme\">\n{}</div>", section.readme);
    }

    if !section.documents.is_empty() {
        out.push_str("<ul class=\"documents\">\n");
        for doc in &section.documents {
            let _ = writeln!(
                out,
                "<li><a href=\"{}\">{}</a></li>",
                encode_href(&doc.url),
                escape_html(&doc.name)
            );
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</section>\n");
}

/// Percent-encode each path segment of a document URL.
fn encode_href(url: &str) -> String {
    url.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shelf_site::Document;

    use super::*;

    fn section(name: &str, docs: &[(&str, &str)], readme: &str) -> Section {
        Section {
            name: name.to_owned(),
            documents: docs
                .iter()
                .map(|(name, url)| Document {
                    name: (*name).to_owned(),
                    url: (*url).to_owned(),
                })
                .collect(),
            readme: readme.to_owned(),
        }
    }

    #[test]
    fn test_encode_href_keeps_slashes() {
        assert_eq!(
            encode_href("/docs/HR/2025/Leave policy.pdf"),
            "/docs/HR/2025/Leave%20policy.pdf"
        );
        assert_eq!(encode_href("/docs/a&b.pdf"), "/docs/a%26b.pdf");
    }

    #[test]
    fn test_render_section_with_readme_and_documents() {
        let mut out = String::new();
        render_section(
            &mut out,
            &section(
                "HR/2025",
                &[("Policy.pdf", "/docs/HR/2025/Policy.pdf")],
                "<h1>HR Section</h1>\n",
            ),
        );

        assert_eq!(
            out,
            "<section>\n<h2>HR/2025</h2>\n\
             <div class=\"readme\">\n<h1>HR Section</h1>\n</div>\n\
             <ul class=\"documents\">\n\
             <li><a href=\"/docs/HR/2025/Policy.pdf\">Policy.pdf</a></li>\n\
             </ul>\n</section>\n"
        );
    }

    #[test]
    fn test_render_section_readme_only_has_no_list() {
        let mut out = String::new();
        render_section(&mut out, &section("Notes", &[], "<p>hi</p>\n"));

        assert!(out.contains("<p>hi</p>"));
        assert!(!out.contains("<ul"));
    }

    #[test]
    fn test_render_escapes_names() {
        let mut out = String::new();
        render_section(
            &mut out,
            &section("<b>", &[("<script>.pdf", "/docs/<b>/<script>.pdf")], ""),
        );

        assert!(out.contains("<h2>&lt;b&gt;</h2>"));
        assert!(out.contains(">&lt;script&gt;.pdf</a>"));
        assert!(out.contains("href=\"/docs/%3Cb%3E/%3Cscript%3E.pdf\""));
        assert!(!out.contains("class=\"readme\""));
    }

    #[test]
    fn test_render_page_empty() {
        let page = render_page(&[]);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("No documents found."));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn test_render_page_keeps_section_order() {
        let page = render_page(&[
            section("General", &[("a.pdf", "/docs/a.pdf")], ""),
            section("HR", &[("b.pdf", "/docs/HR/b.pdf")], ""),
        ]);

        let general = page.find("<h2>General</h2>").unwrap();
        let hr = page.find("<h2>HR</h2>").unwrap();
        assert!(general < hr);
    }
}
