/// Escape LIKE wildcards (% and _) in a search string
pub fn escape_like_wildcards(s: &str) -> String { s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_") }

/// Build a lowercase, escaped `%term%` pattern for case-insensitive matching
pub fn like_pattern(search: &str) -> String { format!("%{}%", escape_like_wildcards(&search.to_lowercase())) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("plain"), "plain");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("Basket"), "%basket%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
