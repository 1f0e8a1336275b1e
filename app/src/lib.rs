/// Vellum Library
///
/// A personal publishing client backed by a hosted backend platform for
/// accounts, post records, and image storage. The application renders
/// feeds and single posts, and walks authors through publishing,
/// editing, and deleting their work.
///
/// # Modules
///
/// - `app_state`: Service wiring shared by every command
/// - `cli`: Command parsing and dispatch
/// - `config`: Configuration management
/// - `error`: Error types and handling
/// - `flows`: Multi-step user flows (post submission)
/// - `models`: Post domain models
/// - `services`: Business logic over the platform boundary
/// - `session_store`: On-disk session persistence
/// - `text`: Content sanitizing and slug derivation
/// - `validators`: Input validation
/// - `views`: Page state view-models
pub mod app_state;
pub mod cli;
pub mod config;
pub mod error;
pub mod flows;
pub mod models;
pub mod services;
pub mod session_store;
pub mod text;
pub mod validators;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use error::{AppError, Result};
