//! On-disk persistence for the platform session secret.
//!
//! A command-line process is short lived, so the secret returned by a
//! login has to outlive the process for later commands to stay
//! authenticated. The store keeps it in a single file, overridable via
//! `VELLUM_SESSION_FILE` for tests and multi-account setups.

use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

const SESSION_FILE_ENV: &str = "VELLUM_SESSION_FILE";
const DEFAULT_DIR: &str = ".vellum";
const DEFAULT_FILE: &str = "session";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Resolves the session file path from the environment. Falls back to
    /// `$HOME/.vellum/session`, or a file in the working directory when
    /// HOME is unset.
    pub fn from_env() -> Self {
        let path = env::var_os(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| match env::var_os("HOME") {
                Some(home) => PathBuf::from(home).join(DEFAULT_DIR).join(DEFAULT_FILE),
                None => PathBuf::from(DEFAULT_FILE),
            });
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the persisted secret, if any. Unreadable or empty files
    /// count as no session.
    pub fn load(&self) -> Option<String> {
        let secret = fs::read_to_string(&self.path).ok()?;
        let secret = secret.trim();
        if secret.is_empty() {
            None
        } else {
            Some(secret.to_string())
        }
    }

    pub fn save(&self, secret: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, secret)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        debug!(path = %self.path.display(), "session secret persisted");
        Ok(())
    }

    /// Removes the persisted secret. A missing file is already the
    /// desired state and is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
