//! Document endpoints.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::Appwrite;
use crate::error::Result;
use crate::models::{Document, DocumentList};
use crate::query::Query;

/// Document CRUD against one project's databases.
#[derive(Clone)]
pub struct Databases {
    client: Appwrite,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentRequest<'a> {
    document_id: &'a str,
    data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    permissions: &'a [String],
}

#[derive(Debug, Serialize)]
struct UpdateDocumentRequest<'a> {
    data: &'a Map<String, Value>,
}

impl Databases {
    pub fn new(client: Appwrite) -> Self {
        Self { client }
    }

    /// Stores a new document under an explicit id, with optional grant
    /// strings (see [`crate::Permission`]).
    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
        permissions: &[String],
    ) -> Result<Document> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        let request = CreateDocumentRequest {
            document_id,
            data,
            permissions,
        };
        let document: Document = self.client.post_json(&path, &request).await?;
        debug!(document_id = %document.id, collection_id = %collection_id, "document created");
        Ok(document)
    }

    pub async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        self.client.get_json(&path, &[]).await
    }

    /// Patches the named document; only the attributes present in `data`
    /// change.
    pub async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
    ) -> Result<Document> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        self.client
            .patch_json(&path, &UpdateDocumentRequest { data })
            .await
    }

    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        self.client.delete(&path).await
    }

    /// Lists documents, each query sent as one `queries[]` parameter.
    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_json()))
            .collect();
        self.client.get_json(&path, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_serialization() {
        let mut data = Map::new();
        data.insert("title".to_string(), Value::String("First".to_string()));
        let permissions = vec![r#"read("user:u1")"#.to_string()];
        let request = CreateDocumentRequest {
            document_id: "doc1",
            data: &data,
            permissions: &permissions,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""documentId":"doc1""#));
        assert!(json.contains(r#""title":"First""#));
        assert!(json.contains(r#"read(\"user:u1\")"#));
    }

    #[test]
    fn test_create_request_omits_empty_permissions() {
        let data = Map::new();
        let request = CreateDocumentRequest {
            document_id: "doc1",
            data: &data,
            permissions: &[],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("permissions"));
    }

    #[test]
    fn test_update_request_wraps_data() {
        let mut data = Map::new();
        data.insert("status".to_string(), Value::String("inactive".to_string()));
        let json = serde_json::to_string(&UpdateDocumentRequest { data: &data }).unwrap();
        assert_eq!(json, r#"{"data":{"status":"inactive"}}"#);
    }
}
