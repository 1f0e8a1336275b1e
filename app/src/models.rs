//! Domain models for posts and uploads.

use appwrite_client::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{AppError, Result};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Active,
    Inactive,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(PostStatus::Active),
            "inactive" => Ok(PostStatus::Inactive),
            other => Err(AppError::Validation(format!(
                "unknown post status: {}",
                other
            ))),
        }
    }
}

/// A stored blog post.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Plain text, tag-free, capped at storage time.
    pub content: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub owner_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Maps a stored document onto the post shape. A document without a
    /// title or owner attribute is malformed; an unknown stored status
    /// degrades to active rather than failing the whole record.
    pub fn from_document(doc: &Document) -> Result<Self> {
        Ok(Self {
            id: doc.id.clone(),
            title: required_attr(doc, "title")?,
            slug: doc.str_attr("slug").unwrap_or_default().to_string(),
            content: doc.str_attr("content").unwrap_or_default().to_string(),
            featured_image: image_attr(doc),
            status: status_attr(doc),
            owner_id: required_attr(doc, "userid")?,
            created_at: doc.created_at,
        })
    }
}

/// One row of the feed listing.
///
/// The listing projection is fixed and does not include the slug; posts
/// are addressed by id.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub owner_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl PostSummary {
    pub fn from_document(doc: &Document) -> Result<Self> {
        Ok(Self {
            id: doc.id.clone(),
            title: required_attr(doc, "title")?,
            content: doc.str_attr("content").unwrap_or_default().to_string(),
            featured_image: image_attr(doc),
            status: status_attr(doc),
            owner_id: required_attr(doc, "userid")?,
            created_at: doc.created_at,
        })
    }
}

fn required_attr(doc: &Document, key: &str) -> Result<String> {
    doc.str_attr(key).map(str::to_string).ok_or_else(|| {
        AppError::MalformedRecord(format!("document {} has no {} attribute", doc.id, key))
    })
}

/// An empty stored reference means "no image".
fn image_attr(doc: &Document) -> Option<String> {
    doc.str_attr("featuredImage")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn status_attr(doc: &Document) -> PostStatus {
    match doc.str_attr("status") {
        None => PostStatus::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            debug!(document_id = %doc.id, status = %raw, "unknown stored status, treating as active");
            PostStatus::Active
        }),
    }
}

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    /// Raw authored content; non-string values are serialized before
    /// sanitization.
    pub content: Option<Value>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    pub owner_id: String,
}

/// Partial update; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<Value>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
}

/// An image payload destined for the media bucket.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}
