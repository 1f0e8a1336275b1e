//! Shared application state and service wiring.

use std::sync::Arc;

use appwrite_client::{Account, Appwrite, Databases, Storage};
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::services::{AssetService, PostService, SessionService};

/// Handles built once at startup and cloned into every command. This is
/// the single place the platform client and the services are wired
/// together.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: Appwrite,
    pub sessions: SessionService,
    pub posts: PostService,
    pub assets: AssetService,
}

impl AppState {
    pub fn initialize(settings: Settings) -> Result<Self> {
        let platform = &settings.platform;

        let client = Appwrite::new(&platform.endpoint, &platform.project_id)?;
        info!(endpoint = %platform.endpoint, project_id = %platform.project_id, "platform client ready");

        let sessions = SessionService::new(Account::new(client.clone()));
        let posts = PostService::new(
            Databases::new(client.clone()),
            &platform.database_id,
            &platform.collection_id,
        );
        let assets = AssetService::new(Storage::new(client.clone()), &platform.bucket_id);
        info!("services initialized");

        Ok(Self {
            settings: Arc::new(settings),
            client,
            sessions,
            posts,
            assets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformSettings;

    #[test]
    fn test_initialize_wires_services() {
        let settings = Settings {
            platform: PlatformSettings {
                endpoint: "https://cloud.example.com/v1".to_string(),
                project_id: "blog-project".to_string(),
                database_id: "blog".to_string(),
                collection_id: "posts".to_string(),
                bucket_id: "media".to_string(),
            },
        };

        let state = AppState::initialize(settings).expect("static settings wire up");
        assert_eq!(state.settings.platform.bucket_id, "media");
        assert_eq!(
            state.assets.preview_url("img1").expect("url for non-empty id"),
            "https://cloud.example.com/v1/storage/buckets/media/files/img1/view?project=blog-project"
        );
    }

    #[test]
    fn test_initialize_rejects_bad_endpoint() {
        let settings = Settings {
            platform: PlatformSettings {
                endpoint: "not a url".to_string(),
                project_id: "blog-project".to_string(),
                database_id: "blog".to_string(),
                collection_id: "posts".to_string(),
                bucket_id: "media".to_string(),
            },
        };

        assert!(AppState::initialize(settings).is_err());
    }
}
