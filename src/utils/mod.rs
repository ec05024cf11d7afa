/// Check that a candidate page name is non-empty and purely ASCII alphanumeric
pub fn is_valid_page_name(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
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
    fn valid_names() {
        for name in ["a", "Z", "0", "Home", "FrontPage2", "123"] {
            assert!(is_valid_page_name(name), "{name:?}");
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", " ", "Home Page", "../etc", "a-b", "a.txt", "Ä", "tab\t", "[Home]"] {
            assert!(!is_valid_page_name(name), "{name:?}");
        }
    }

    #[test]
    fn validity_matches_char_definition_for_assorted_strings() {
        let samples = ["abc", "ab c", "x9", "ünï", "", "A1b2C3", "q/", "٣"];
        for s in samples {
            let expected = !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
            assert_eq!(is_valid_page_name(s), expected, "{s:?}");
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
