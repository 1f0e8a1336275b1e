//! Featured-image storage over the platform bucket.

use appwrite_client::{id, Storage, StoredFile};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::ImageUpload;

/// Content types the authoring form accepts.
const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpg", "image/jpeg", "image/gif"];

/// Bucket-backed image repository.
#[derive(Clone)]
pub struct AssetService {
    storage: Storage,
    bucket_id: String,
}

impl AssetService {
    pub fn new(storage: Storage, bucket_id: &str) -> Self {
        Self {
            storage,
            bucket_id: bucket_id.to_string(),
        }
    }

    /// Uploads an image and returns the stored file. Empty payloads and
    /// content types outside the accepted image set are rejected before
    /// any platform call. The file id is minted here.
    pub async fn upload(&self, image: ImageUpload) -> Result<StoredFile> {
        if image.bytes.is_empty() {
            return Err(AppError::Validation("image payload is empty".to_string()));
        }
        let essence = image.content_type.essence_str();
        if !ACCEPTED_IMAGE_TYPES.contains(&essence) {
            return Err(AppError::Validation(format!(
                "unsupported image type: {}",
                essence
            )));
        }

        let file_id = id::unique();
        let file = self
            .storage
            .create_file(
                &self.bucket_id,
                &file_id,
                &image.filename,
                image.bytes,
                essence,
            )
            .await
            .map_err(|e| {
                error!(filename = %image.filename, error = %e, "failed to upload image");
                e
            })?;

        info!(file_id = %file.id, size = file.size_original, "image uploaded");
        Ok(file)
    }

    /// Removes a stored image. `Ok(false)` when it was already gone.
    pub async fn delete(&self, file_id: &str) -> Result<bool> {
        match self.storage.delete_file(&self.bucket_id, file_id).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!(file_id = %file_id, "delete of a missing file");
                Ok(false)
            }
            Err(e) => {
                error!(file_id = %file_id, error = %e, "failed to delete image");
                Err(e.into())
            }
        }
    }

    /// Best-effort removal of an image that lost its reason to exist
    /// (a superseded or orphaned upload). One retry, then a warning;
    /// callers never fail on cleanup.
    pub async fn delete_best_effort(&self, file_id: &str) {
        for attempt in 1..=2u8 {
            match self.delete(file_id).await {
                Ok(_) => return,
                Err(e) if attempt == 1 => {
                    warn!(file_id = %file_id, error = %e, "image cleanup failed, retrying");
                }
                Err(e) => {
                    warn!(file_id = %file_id, error = %e, "image cleanup failed, leaving orphan");
                }
            }
        }
    }

    /// Display URL for a stored image id; `None` for an empty id. Pure
    /// construction, the file is not checked for existence.
    pub fn preview_url(&self, file_id: &str) -> Option<String> {
        if file_id.is_empty() {
            return None;
        }
        Some(self.storage.file_view_url(&self.bucket_id, file_id))
    }
}
