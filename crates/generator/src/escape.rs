/// HTML-escape a string for text and attribute positions
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Make JSON safe to embed in a `<script>` element
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_basic_characters() {
        assert_eq!(html_escape("&"), "&amp;");
        assert_eq!(html_escape("<"), "&lt;");
        assert_eq!(html_escape(">"), "&gt;");
        assert_eq!(html_escape("\""), "&quot;");
        assert_eq!(html_escape("'"), "&#x27;");
    }

    #[test]
    fn test_html_escape_xss_attempts() {
        assert_eq!(
            html_escape("<script>alert('XSS')</script>"),
            "&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;"
        );
        assert_eq!(
            html_escape("\" onload=\"alert(1)"),
            "&quot; onload=&quot;alert(1)"
        );
    }

    #[test]
    fn test_html_escape_unicode() {
        assert_eq!(html_escape("龙虾 🦞"), "龙虾 🦞");
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
        assert_eq!(escape_xml("<loc>"), "&lt;loc&gt;");
    }

    #[test]
    fn test_escape_script_json() {
        assert_eq!(
            escape_script_json(r#"{"a":"</script><script>x"}"#),
            r#"{"a":"<\/script><script>x"}"#
        );
    }
}
