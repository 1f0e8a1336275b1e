//! Post persistence over the platform document store.
//!
//! Every fallible operation reports its outcome in the type: a missing
//! document is `Ok(None)` or `Ok(false)`, an empty feed is an empty
//! vector, and only actual failures are `Err`.

use appwrite_client::{id, Databases, Permission, Query, Role};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::models::{NewPost, Post, PostPatch, PostStatus, PostSummary};
use crate::text::sanitize_content;

/// Longest stored title, slug, and owner reference, in characters.
const MAX_FIELD_CHARS: usize = 255;

/// Fields the feed listing returns. Internal fields must be named to
/// survive the projection.
const LIST_PROJECTION: [&str; 7] = [
    "title",
    "content",
    "featuredImage",
    "status",
    "userid",
    "$id",
    "$createdAt",
];

/// Document-store backed post repository.
#[derive(Clone)]
pub struct PostService {
    databases: Databases,
    database_id: String,
    collection_id: String,
}

impl PostService {
    pub fn new(databases: Databases, database_id: &str, collection_id: &str) -> Self {
        Self {
            databases,
            database_id: database_id.to_string(),
            collection_id: collection_id.to_string(),
        }
    }

    /// Stores a new post and returns the persisted record.
    ///
    /// Content is sanitized and capped, text fields truncated, the status
    /// defaulted to active, and read/update/delete grants scoped to the
    /// owner. The document id is minted here.
    pub async fn create(&self, new: &NewPost) -> Result<Post> {
        let owner = truncate_chars(&new.owner_id, MAX_FIELD_CHARS);

        let mut data = Map::new();
        data.insert(
            "title".to_string(),
            Value::String(truncate_chars(&new.title, MAX_FIELD_CHARS)),
        );
        data.insert(
            "slug".to_string(),
            Value::String(truncate_chars(&new.slug, MAX_FIELD_CHARS)),
        );
        data.insert(
            "content".to_string(),
            Value::String(sanitize_content(new.content.as_ref())),
        );
        data.insert(
            "featuredImage".to_string(),
            Value::String(new.featured_image.clone().unwrap_or_default()),
        );
        data.insert(
            "status".to_string(),
            Value::String(new.status.unwrap_or_default().as_str().to_string()),
        );
        data.insert("userid".to_string(), Value::String(owner.clone()));

        let permissions = vec![
            Permission::read(Role::user(&owner)),
            Permission::update(Role::user(&owner)),
            Permission::delete(Role::user(&owner)),
        ];

        let document_id = id::unique();
        let doc = self
            .databases
            .create_document(
                &self.database_id,
                &self.collection_id,
                &document_id,
                &data,
                &permissions,
            )
            .await
            .map_err(|e| {
                error!(error = %e, "failed to create post");
                e
            })?;

        info!(post_id = %doc.id, owner_id = %owner, "post created");
        Post::from_document(&doc)
    }

    /// Applies the supplied fields to a stored post; absent fields stay
    /// untouched. Provided content is re-sanitized, a provided title
    /// re-truncated.
    pub async fn update(&self, post_id: &str, patch: &PostPatch) -> Result<Post> {
        let mut data = Map::new();
        if let Some(title) = &patch.title {
            data.insert(
                "title".to_string(),
                Value::String(truncate_chars(title, MAX_FIELD_CHARS)),
            );
        }
        if let Some(content) = &patch.content {
            data.insert(
                "content".to_string(),
                Value::String(sanitize_content(Some(content))),
            );
        }
        if let Some(image) = &patch.featured_image {
            data.insert("featuredImage".to_string(), Value::String(image.clone()));
        }
        if let Some(status) = patch.status {
            data.insert(
                "status".to_string(),
                Value::String(status.as_str().to_string()),
            );
        }

        let doc = self
            .databases
            .update_document(&self.database_id, &self.collection_id, post_id, &data)
            .await
            .map_err(|e| {
                error!(post_id = %post_id, error = %e, "failed to update post");
                e
            })?;

        info!(post_id = %doc.id, fields = data.len(), "post updated");
        Post::from_document(&doc)
    }

    /// Removes a post. `Ok(false)` when it was already gone.
    pub async fn delete(&self, post_id: &str) -> Result<bool> {
        match self
            .databases
            .delete_document(&self.database_id, &self.collection_id, post_id)
            .await
        {
            Ok(()) => {
                info!(post_id = %post_id, "post deleted");
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                debug!(post_id = %post_id, "delete of a missing post");
                Ok(false)
            }
            Err(e) => {
                error!(post_id = %post_id, error = %e, "failed to delete post");
                Err(e.into())
            }
        }
    }

    /// Fetches one post. `Ok(None)` when the id does not exist.
    pub async fn get(&self, post_id: &str) -> Result<Option<Post>> {
        match self
            .databases
            .get_document(&self.database_id, &self.collection_id, post_id)
            .await
        {
            Ok(doc) => Ok(Some(Post::from_document(&doc)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                error!(post_id = %post_id, error = %e, "failed to fetch post");
                Err(e.into())
            }
        }
    }

    /// Lists posts for the feed. Without filters only active posts are
    /// returned; the fixed summary projection is always appended.
    /// Malformed rows are skipped so one bad document cannot empty the
    /// feed.
    pub async fn list(&self, filters: Option<Vec<Query>>) -> Result<Vec<PostSummary>> {
        let mut queries = filters.unwrap_or_else(|| {
            vec![Query::equal("status", PostStatus::Active.as_str())]
        });
        queries.push(Query::select(LIST_PROJECTION));

        let list = self
            .databases
            .list_documents(&self.database_id, &self.collection_id, &queries)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to list posts");
                e
            })?;

        let mut summaries = Vec::with_capacity(list.documents.len());
        for doc in &list.documents {
            match PostSummary::from_document(doc) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    warn!(document_id = %doc.id, error = %e, "skipping malformed post document")
                }
            }
        }
        Ok(summaries)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Two-byte characters are kept whole.
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }

    #[test]
    fn test_projection_includes_internal_fields() {
        assert!(LIST_PROJECTION.contains(&"$id"));
        assert!(LIST_PROJECTION.contains(&"$createdAt"));
        assert!(!LIST_PROJECTION.contains(&"slug"));
    }
}
