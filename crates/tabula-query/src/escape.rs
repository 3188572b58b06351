//! SQL literal escaping.

/// Escape a value for inclusion in a single-quoted SQL literal.
///
/// The canonical rule is the superset variant: `'` doubled, plus backslash,
/// double quote, backspace, newline, carriage return and tab escaped as in
/// JSON. Single pass, so inserted backslashes are never re-escaped.
pub fn escape_sql(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_single_quotes() {
        assert_eq!(escape_sql("O'Brien"), "O''Brien");
    }

    #[test]
    fn escapes_superset_characters() {
        assert_eq!(escape_sql("a\\b\"c\nd\te"), "a\\\\b\\\"c\\nd\\te");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_sql("plain value 42"), "plain value 42");
    }
}
