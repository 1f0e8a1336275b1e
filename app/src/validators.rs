//! Input validation for account operations.
//!
//! All checks run before any platform call so obviously bad credentials
//! never leave the process.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length the platform accepts.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Longest display name we store.
pub const MAX_NAME_CHARS: usize = 128;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_NAME_CHARS
}
