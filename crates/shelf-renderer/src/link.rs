//! Destination rewriting for links and images.
//!
//! The rule only looks at the destination string, so links and images share
//! it unchanged.

use std::borrow::Cow;

/// Classification of a link or image destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Path relative to the README's directory (e.g. `chart.png`, `../a.pdf`).
    Relative,
    /// Absolute path on this server (starts with `/`).
    Absolute,
    /// Fully-qualified `http://` or `https://` URL.
    External,
    /// Inline `data:` image payload.
    Inline,
    /// Scheme that can execute or embed content (`javascript:`, `data:`, ...).
    Unsafe,
}

/// Schemes that are never emitted into rendered HTML.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:", "data:"];

/// Inline image payloads that remain allowed under `data:`.
const SAFE_DATA_IMAGES: &[&str] = &[
    "data:image/png",
    "data:image/gif",
    "data:image/jpeg",
    "data:image/webp",
];

/// Check whether `s` starts with `prefix`, ignoring ASCII case.
fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Classify a destination reference.
///
/// # Examples
///
/// ```
/// use shelf_renderer::{ReferenceKind, classify_reference};
///
/// assert_eq!(classify_reference("img.png"), ReferenceKind::Relative);
/// assert_eq!(classify_reference("/absolute/x.png"), ReferenceKind::Absolute);
/// assert_eq!(classify_reference("HTTPS://example.com"), ReferenceKind::External);
/// assert_eq!(classify_reference("javascript:alert(1)"), ReferenceKind::Unsafe);
/// ```
pub fn classify_reference(dest: &str) -> ReferenceKind {
    let trimmed = dest.trim_start();
    if SAFE_DATA_IMAGES
        .iter()
        .any(|s| has_prefix_ignore_case(trimmed, s))
    {
        return ReferenceKind::Inline;
    }
    if UNSAFE_SCHEMES.iter().any(|s| has_prefix_ignore_case(trimmed, s)) {
        return ReferenceKind::Unsafe;
    }
    if has_prefix_ignore_case(dest, "http://") || has_prefix_ignore_case(dest, "https://") {
        return ReferenceKind::External;
    }
    if dest.starts_with('/') {
        return ReferenceKind::Absolute;
    }
    ReferenceKind::Relative
}

/// Rewrite a destination against a section base path.
///
/// `base` is the section's URL prefix without trailing slash
/// (e.g. `/docs/HR/2025`). Relative references are joined onto it, unsafe
/// ones are blanked, everything else passes through unchanged.
///
/// # Examples
///
/// ```
/// use shelf_renderer::rebase_reference;
///
/// assert_eq!(rebase_reference("img.png", "/docs/HR"), "/docs/HR/img.png");
/// assert_eq!(rebase_reference("https://example.com/x.png", "/docs/HR"), "https://example.com/x.png");
/// ```
pub fn rebase_reference<'a>(dest: &'a str, base: &str) -> Cow<'a, str> {
    match classify_reference(dest) {
        ReferenceKind::Relative => Cow::Owned(format!("{base}/{dest}")),
        ReferenceKind::Unsafe => Cow::Borrowed(""),
        ReferenceKind::Absolute | ReferenceKind::External | ReferenceKind::Inline => {
            Cow::Borrowed(dest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_relative_forms() {
        assert_eq!(classify_reference("img.png"), ReferenceKind::Relative);
        assert_eq!(classify_reference("./img.png"), ReferenceKind::Relative);
        assert_eq!(classify_reference("../plan.pdf"), ReferenceKind::Relative);
        assert_eq!(classify_reference("sub/dir/a.pdf"), ReferenceKind::Relative);
    }

    #[test]
    fn test_classify_scheme_is_case_insensitive() {
        assert_eq!(classify_reference("http://a.b/c"), ReferenceKind::External);
        assert_eq!(classify_reference("HtTpS://a.b/c"), ReferenceKind::External);
        assert_eq!(classify_reference("JavaScript:void(0)"), ReferenceKind::Unsafe);
    }

    #[test]
    fn test_classify_data_images_allowed() {
        assert_eq!(
            classify_reference("data:image/png;base64,AAAA"),
            ReferenceKind::Inline
        );
        assert_eq!(
            classify_reference("data:text/html;base64,AAAA"),
            ReferenceKind::Unsafe
        );
    }

    #[test]
    fn test_classify_short_destinations() {
        assert_eq!(classify_reference(""), ReferenceKind::Relative);
        assert_eq!(classify_reference("/"), ReferenceKind::Absolute);
        assert_eq!(classify_reference("h"), ReferenceKind::Relative);
    }

    #[test]
    fn test_rebase_relative() {
        assert_eq!(
            rebase_reference("chart.png", "/docs/HR/2025"),
            "/docs/HR/2025/chart.png"
        );
    }

    #[test]
    fn test_rebase_leaves_absolute_and_external() {
        assert!(matches!(
            rebase_reference("/absolute/x.png", "/docs/HR"),
            Cow::Borrowed("/absolute/x.png")
        ));
        assert!(matches!(
            rebase_reference("https://example.com/x.png", "/docs/HR"),
            Cow::Borrowed("https://example.com/x.png")
        ));
    }

    #[test]
    fn test_rebase_blanks_unsafe() {
        assert_eq!(rebase_reference("javascript:alert(1)", "/docs/HR"), "");
        assert_eq!(rebase_reference("vbscript:msgbox", "/docs/HR"), "");
        assert_eq!(rebase_reference("file:///etc/passwd", "/docs/HR"), "");
    }
}
