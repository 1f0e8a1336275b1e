//! Wire types returned by the platform.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// An account identity.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(rename = "$createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "emailVerification", default)]
    pub email_verification: bool,
}

/// An authenticated session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub expire: String,
    /// Present when the platform hands the secret back in the response
    /// body rather than a cookie.
    #[serde(default)]
    pub secret: Option<String>,
}

/// A stored document.
///
/// Only `$id` is guaranteed: a `select` projection strips every internal
/// field that was not asked for, so the rest is optional and the
/// collection attributes land in [`Document::attributes`].
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId")]
    pub collection_id: Option<String>,
    #[serde(rename = "$databaseId")]
    pub database_id: Option<String>,
    #[serde(rename = "$createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Document {
    /// String attribute by name; `None` when absent or not a string.
    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Raw attribute by name.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// A page of documents.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A stored bucket file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "bucketId", default)]
    pub bucket_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    pub size_original: u64,
    #[serde(rename = "$createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}
