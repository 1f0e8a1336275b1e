use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the platform client.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-2xx response carrying a parseable platform error envelope.
    #[error("platform error {code} ({kind}): {message}")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    /// Non-2xx response whose body did not match the error envelope.
    #[error("unexpected http status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// True when the platform rejected the call for a missing or expired
    /// session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Api { code: 401, .. } | Error::Http { status: 401, .. }
        )
    }

    /// True when the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Api { code: 404, .. } | Error::Http { status: 404, .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error body shape the platform returns for every failed call.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub message: String,
    pub code: Option<u16>,
    #[serde(rename = "type", default)]
    pub kind: String,
}
