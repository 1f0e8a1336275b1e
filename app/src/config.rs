//! Configuration management.
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! # Example
//!
//! ```no_run
//! use vellum::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("Platform endpoint: {}", settings.platform.endpoint);
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;
use validator::Validate;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub platform: PlatformSettings,
}

impl Settings {
    /// Load settings from environment variables (.env in development)
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("Loaded .env file for development");
        }

        let settings = Settings {
            platform: PlatformSettings::from_env()?,
        };
        settings
            .validate()
            .context("Invalid platform configuration")?;
        Ok(settings)
    }
}

/// Connection coordinates for the backend platform
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlatformSettings {
    /// Base API URL including the version prefix
    /// (e.g. "https://cloud.appwrite.io/v1")
    #[validate(url)]
    pub endpoint: String,
    #[validate(length(min = 1))]
    pub project_id: String,
    #[validate(length(min = 1))]
    pub database_id: String,
    #[validate(length(min = 1))]
    pub collection_id: String,
    #[validate(length(min = 1))]
    pub bucket_id: String,
}

impl PlatformSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: env::var("APPWRITE_ENDPOINT")
                .context("APPWRITE_ENDPOINT must be set")?
                .trim_end_matches('/')
                .to_string(),
            project_id: env::var("APPWRITE_PROJECT_ID")
                .context("APPWRITE_PROJECT_ID must be set")?,
            database_id: env::var("APPWRITE_DATABASE_ID")
                .context("APPWRITE_DATABASE_ID must be set")?,
            collection_id: env::var("APPWRITE_COLLECTION_ID")
                .context("APPWRITE_COLLECTION_ID must be set")?,
            bucket_id: env::var("APPWRITE_BUCKET_ID").context("APPWRITE_BUCKET_ID must be set")?,
        })
    }
}
