/// Escape the HTML-significant characters of `text`.
///
/// Each of `& < > " ' /` is replaced by its character reference in a single
/// pass over the input. Substituted output is never re-scanned, so `&` inside
/// an emitted reference is not escaped a second time.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_script_payload() {
        let input = r#"<script>alert("xss")</script> & "q" 's' /x/"#;
        let expected = "&lt;script&gt;alert(&quot;xss&quot;)&lt;&#x2F;script&gt; &amp; &quot;q&quot; &#x27;s&#x27; &#x2F;x&#x2F;";
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_empty_and_plain_text_pass_through() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("Buy milk"), "Buy milk");
        assert_eq!(sanitize("café ☕"), "café ☕");
    }

    #[test]
    fn test_existing_references_are_escaped_once() {
        // An already-escaped string is treated as plain text.
        assert_eq!(sanitize("&amp;"), "&amp;amp;");
        assert_eq!(sanitize("&&"), "&amp;&amp;");
    }

    #[test]
    fn test_is_deterministic() {
        let samples = ["", "a", "<>", "'\"/&", "  spaced  ", "日本語/テキスト"];
        for s in samples {
            assert_eq!(sanitize(s), sanitize(s), "sanitize must be stable for {:?}", s);
        }
    }
}
