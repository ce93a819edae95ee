//! Answer normalization shared by every quiz mode.

/// Trim, lowercase and collapse internal whitespace runs to a single space.
///
/// ```
/// assert_eq!(drill_core::normalize("  Hallo   Welt "), "hallo welt");
/// ```
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Same as [`normalize`], with a missing value treated as empty.
#[must_use]
pub fn normalize_optional(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}

/// Compare a raw answer against the expected text after normalizing both.
#[must_use]
pub fn answers_match(answer: &str, expected: &str) -> bool {
    normalize(answer) == normalize(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_folds() {
        assert_eq!(normalize("  Hallo   Welt "), normalize("hallo welt"));
        assert_eq!(normalize("\tGuten\n Morgen!  "), "guten morgen!");
    }

    #[test]
    fn empty_and_missing_are_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
        assert_eq!(normalize_optional(None), "");
        assert_eq!(normalize_optional(Some(" Ja ")), "ja");
    }

    #[test]
    fn folds_non_ascii_letters() {
        assert_eq!(normalize("TSCHÜSS!"), "tschüss!");
        assert!(answers_match("FÜNF", "fünf"));
    }

    #[test]
    fn punctuation_is_significant() {
        assert!(!answers_match("Hallo", "Hallo!"));
    }
}
