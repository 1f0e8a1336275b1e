//! Multi-step user flows composed from the services.

pub mod submit;

pub use submit::{submit, PostForm};
