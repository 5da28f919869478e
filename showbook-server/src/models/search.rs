//! Name search term handling

/// `ILIKE` pattern matching `term` as a literal substring.
///
/// `\`, `%` and `_` are escaped (the query uses `ESCAPE '\'`). An empty term
/// yields `%%`, which matches every name.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_plain_terms() {
        assert_eq!(like_pattern("hall"), "%hall%");
    }

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\d"), r"%c:\\d%");
    }
}
