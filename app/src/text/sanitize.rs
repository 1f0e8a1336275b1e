//! Content sanitization: strip markup, cap length.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Longest stored content, counted in characters after tag stripping.
pub const MAX_CONTENT_CHARS: usize = 1000;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("hardcoded tag pattern is invalid - fix source code"));

/// Normalizes authored content for storage.
///
/// Strings pass through directly; any other JSON value is serialized
/// first. Markup tags are then stripped and the result capped at
/// [`MAX_CONTENT_CHARS`] characters. Absent or null content becomes the
/// empty string.
pub fn sanitize_content(content: Option<&Value>) -> String {
    match content {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => sanitize_html(s),
        Some(other) => sanitize_html(&other.to_string()),
    }
}

/// Strips `<...>` spans and caps the result. Truncation counts
/// characters, never splitting a scalar value.
pub fn sanitize_html(raw: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(raw, "");
    stripped.chars().take(MAX_CONTENT_CHARS).collect()
}
