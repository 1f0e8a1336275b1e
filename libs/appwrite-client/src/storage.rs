//! Bucket file endpoints.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::Appwrite;
use crate::error::Result;
use crate::models::StoredFile;

/// File upload, deletion, and URL construction for one project's buckets.
#[derive(Clone)]
pub struct Storage {
    client: Appwrite,
}

impl Storage {
    pub fn new(client: Appwrite) -> Self {
        Self { client }
    }

    /// Uploads `bytes` as a new bucket file under an explicit id.
    pub async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredFile> {
        let path = format!("/storage/buckets/{}/files", bucket_id);
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new()
            .text("fileId", file_id.to_string())
            .part("file", part);

        let file: StoredFile = self.client.post_multipart(&path, form).await?;
        debug!(file_id = %file.id, bucket_id = %bucket_id, size = file.size_original, "file uploaded");
        Ok(file)
    }

    pub async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<()> {
        let path = format!("/storage/buckets/{}/files/{}", bucket_id, file_id);
        self.client.delete(&path).await
    }

    /// Display URL for a stored file. Pure construction; existence is not
    /// checked. The view route serves the original bytes, which keeps it
    /// usable on buckets where transformed previews are disabled.
    pub fn file_view_url(&self, bucket_id: &str, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.client.endpoint(),
            bucket_id,
            file_id,
            urlencoding::encode(self.client.project_id())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        let client = Appwrite::new("https://cloud.example.com/v1", "blog-project").unwrap();
        Storage::new(client)
    }

    #[test]
    fn test_file_view_url() {
        let url = storage().file_view_url("media", "img42");
        assert_eq!(
            url,
            "https://cloud.example.com/v1/storage/buckets/media/files/img42/view?project=blog-project"
        );
    }

    #[test]
    fn test_file_view_url_encodes_project() {
        let client = Appwrite::new("https://cloud.example.com/v1", "p 1").unwrap();
        let url = Storage::new(client).file_view_url("media", "img42");
        assert!(url.ends_with("view?project=p%201"));
    }
}
