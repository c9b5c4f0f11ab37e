/// Escape text for safe inclusion in HTML content or attribute values.
///
/// # Examples
///
/// ```
/// use shelf_renderer::escape_html;
///
/// assert_eq!(escape_html("<b>Q&A</b>"), "&lt;b&gt;Q&amp;A&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Quarterly plan"), "Quarterly plan");
    }

    #[test]
    fn test_escape_html_all_special_chars() {
        assert_eq!(
            escape_html(r#"<a href='x'>"&"</a>"#),
            "&lt;a href=&#39;x&#39;&gt;&quot;&amp;&quot;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_preserves_unicode() {
        assert_eq!(escape_html("Отдел <кадров>"), "Отдел &lt;кадров&gt;");
    }
}
