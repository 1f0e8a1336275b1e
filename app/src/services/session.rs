//! Account session management.

use appwrite_client::{id, Account, Session, User};
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::validators::{
    is_valid_email, is_valid_name, is_valid_password, MAX_NAME_CHARS, MIN_PASSWORD_CHARS,
};

/// Session lifecycle on top of the platform account API.
#[derive(Clone)]
pub struct SessionService {
    account: Account,
}

impl SessionService {
    pub fn new(account: Account) -> Self {
        Self { account }
    }

    /// Registers a new identity and immediately logs in with the same
    /// credentials, so a successful sign-up always ends authenticated.
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<Session> {
        if !is_valid_email(email) {
            return Err(AppError::Validation("invalid email address".to_string()));
        }
        if !is_valid_password(password) {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }
        if !is_valid_name(name) {
            return Err(AppError::Validation(format!(
                "name must be non-empty and at most {} characters",
                MAX_NAME_CHARS
            )));
        }

        let user = self
            .account
            .create(&id::unique(), email, password, name)
            .await
            .map_err(|e| {
                error!(error = %e, "sign-up failed");
                AppError::from(e)
            })?;

        info!(user_id = %user.id, "account registered, logging in");
        self.login(email, password).await
    }

    /// Exchanges credentials for a session. The client keeps the secret
    /// for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.account
            .create_email_password_session(email, password)
            .await
            .map_err(|e| {
                error!(error = %e, "login failed");
                AppError::from(e)
            })
    }

    /// The logged-in user, or `Ok(None)` when the platform sees no
    /// session. Any other failure is an error, so callers can tell
    /// "anonymous" from "could not ask".
    pub async fn current_user(&self) -> Result<Option<User>> {
        match self.account.get().await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => {
                error!(error = %e, "failed to fetch current user");
                Err(e.into())
            }
        }
    }

    /// Ends every session for the identity. The locally held secret is
    /// dropped even when the platform call fails.
    pub async fn logout(&self) -> Result<()> {
        self.account.delete_sessions().await.map_err(|e| {
            warn!(error = %e, "logout failed");
            AppError::from(e)
        })
    }
}
