//! Connection handle shared by the per-resource services.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Error, ErrorEnvelope, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cheaply cloneable handle for one project on one endpoint.
///
/// Every request carries the project header; once a session has been
/// established through [`crate::Account`], the session secret rides along
/// as well.
#[derive(Clone, Debug)]
pub struct Appwrite {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    endpoint: String,
    project_id: String,
    http: Client,
    session: RwLock<Option<String>>,
}

impl Appwrite {
    /// Builds a handle for `endpoint` (with its version prefix, e.g.
    /// `https://cloud.appwrite.io/v1`) and `project_id`. A trailing slash
    /// on the endpoint is trimmed.
    pub fn new(endpoint: &str, project_id: &str) -> Result<Self> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        Url::parse(&endpoint)
            .map_err(|e| Error::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                endpoint,
                project_id: project_id.to_string(),
                http,
                session: RwLock::new(None),
            }),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Replaces the session secret sent with subsequent requests.
    /// Embedders use this to restore a previously persisted session.
    pub async fn set_session(&self, secret: Option<String>) {
        *self.inner.session.write().await = secret;
    }

    pub async fn has_session(&self) -> bool {
        self.inner.session.read().await.is_some()
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.endpoint, path);
        let mut builder = self
            .inner
            .http
            .request(method, url)
            .header("X-Appwrite-Project", &self.inner.project_id);
        if let Some(secret) = self.inner.session.read().await.as_deref() {
            builder = builder.header("X-Appwrite-Session", secret);
        }
        builder
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let builder = self.request(Method::GET, path).await.query(query);
        self.send_json(builder).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).await.json(body);
        self.send_json(builder).await
    }

    pub(crate) async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PATCH, path).await.json(body);
        self.send_json(builder).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path).await.multipart(form);
        self.send_json(builder).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path).await.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read response body".to_string());
        Err(api_error(status, body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read response body".to_string());

        if !status.is_success() {
            debug!(status = %status, body = %body, "platform request failed");
            return Err(api_error(status, body));
        }

        serde_json::from_str(&body).map_err(Error::from)
    }
}

/// Maps a non-2xx response to [`Error::Api`] when the body carries the
/// platform envelope, [`Error::Http`] otherwise.
fn api_error(status: StatusCode, body: String) -> Error {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => Error::Api {
            code: envelope.code.unwrap_or_else(|| status.as_u16()),
            kind: envelope.kind,
            message: envelope.message,
        },
        Err(_) => Error::Http {
            status: status.as_u16(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = Appwrite::new("https://cloud.example.com/v1/", "proj").unwrap();
        assert_eq!(client.endpoint(), "https://cloud.example.com/v1");
        assert_eq!(client.project_id(), "proj");
    }

    #[test]
    fn test_rejects_unparseable_endpoint() {
        let err = Appwrite::new("not a url", "proj").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_envelope_body_maps_to_api_error() {
        let body = r#"{"message":"not found","code":404,"type":"document_not_found"}"#;
        let err = api_error(StatusCode::NOT_FOUND, body.to_string());
        match err {
            Error::Api { code, kind, .. } => {
                assert_eq!(code, 404);
                assert_eq!(kind, "document_not_found");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_body_maps_to_http_error() {
        let err = api_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>".to_string());
        match err {
            Error::Http { status, .. } => assert_eq!(status, 502),
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_without_code_falls_back_to_status() {
        let body = r#"{"message":"oops","type":"general_unknown"}"#;
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, body.to_string());
        match err {
            Error::Api { code, .. } => assert_eq!(code, 500),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_session_secret_lifecycle() {
        let client = Appwrite::new("https://cloud.example.com/v1", "proj").unwrap();
        assert!(!client.has_session().await);
        client.set_session(Some("secret".to_string())).await;
        assert!(client.has_session().await);
        client.set_session(None).await;
        assert!(!client.has_session().await);
    }
}
