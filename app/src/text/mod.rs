//! Text transforms applied to authored input.

pub mod sanitize;
pub mod slug;

pub use sanitize::{sanitize_content, sanitize_html, MAX_CONTENT_CHARS};
pub use slug::slugify;
