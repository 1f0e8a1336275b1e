//! Account and session endpoints.

use serde::Serialize;
use tracing::{debug, info};

use crate::client::Appwrite;
use crate::error::Result;
use crate::models::{Session, User};

/// Identity operations for the current project.
#[derive(Clone)]
pub struct Account {
    client: Appwrite,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
    user_id: &'a str,
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl Account {
    pub fn new(client: Appwrite) -> Self {
        Self { client }
    }

    /// Registers a new identity. Does not establish a session.
    pub async fn create(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User> {
        let request = CreateAccountRequest {
            user_id,
            email,
            password,
            name,
        };
        let user: User = self.client.post_json("/account", &request).await?;
        info!(user_id = %user.id, "account created");
        Ok(user)
    }

    /// Exchanges credentials for a session. The returned secret (when the
    /// platform hands one back in the body) is kept on the shared client
    /// and sent with subsequent requests.
    pub async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let request = CreateSessionRequest { email, password };
        let session: Session = self
            .client
            .post_json("/account/sessions/email", &request)
            .await?;

        let secret = session.secret.clone().filter(|s| !s.is_empty());
        self.client.set_session(secret).await;
        info!(user_id = %session.user_id, session_id = %session.id, "session established");
        Ok(session)
    }

    /// The identity behind the current session. A missing session is a
    /// 401 from the platform, surfaced as [`crate::Error::Api`].
    pub async fn get(&self) -> Result<User> {
        self.client.get_json("/account", &[]).await
    }

    /// Invalidates every session for the identity. The locally held
    /// secret is dropped even when the call fails, so a half-dead session
    /// can always be abandoned.
    pub async fn delete_sessions(&self) -> Result<()> {
        let result = self.client.delete("/account/sessions").await;
        self.client.set_session(None).await;
        debug!(ok = result.is_ok(), "sessions deleted");
        result
    }
}
