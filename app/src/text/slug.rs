//! Slug derivation from post titles.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9_\s-]").expect("hardcoded slug charset pattern is invalid - fix source code")
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("hardcoded whitespace pattern is invalid - fix source code")
});

static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-{2,}").expect("hardcoded hyphen pattern is invalid - fix source code")
});

/// Derives a URL slug from a title.
///
/// Trim, lowercase, drop everything outside `[a-z0-9_ -]`, turn
/// whitespace runs into single hyphens, collapse hyphen runs, and trim
/// hyphens at the ends. Idempotent; whitespace-only input yields the
/// empty string.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&cleaned, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_derivation() {
        assert_eq!(slugify(" Hello, World! "), "hello-world");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slugify("C'est la vie?"), "cest-la-vie");
    }

    #[test]
    fn test_underscores_survive() {
        assert_eq!(slugify("snake_case title"), "snake_case-title");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(slugify("a -- b --- c"), "a-b-c");
    }

    #[test]
    fn test_no_leading_or_trailing_hyphens() {
        assert_eq!(slugify("--x--"), "x");
        assert_eq!(slugify("!wow!"), "wow");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Ünïcode Pöst"), "ncode-pst");
    }

    #[test]
    fn test_idempotent() {
        let first = slugify(" My Fancy Post!! ");
        assert_eq!(slugify(&first), first);
    }

    #[test]
    fn test_slug_charset_property() {
        let slug = slugify("A title, with: EVERY kind?? of -- junk __ in it 42");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
        assert!(!slug.contains("--"));
    }
}
