//! Application error taxonomy.
//!
//! Two classes of failure exist: inputs rejected before any platform
//! call ([`AppError::Validation`]) and platform calls that failed
//! ([`AppError::Platform`]). Services translate the interesting platform
//! outcomes (missing document, anonymous session) into typed values
//! instead of errors; everything else propagates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any platform call was made.
    #[error("{0}")]
    Validation(String),

    /// The operation needs a logged-in user.
    #[error("not logged in")]
    Unauthorized,

    /// The logged-in user is not allowed to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A stored document is missing attributes this application requires.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("platform error: {0}")]
    Platform(#[from] appwrite_client::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_bare_message() {
        let err = AppError::Validation("a featured image is required".to_string());
        assert_eq!(err.to_string(), "a featured image is required");
    }

    #[test]
    fn test_platform_error_wraps_client_error() {
        let client_err = appwrite_client::Error::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let err = AppError::from(client_err);
        assert!(err.to_string().starts_with("platform error:"));
        assert!(matches!(err, AppError::Platform(_)));
    }
}
