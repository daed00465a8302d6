//! Backend session token resolution
//!
//! The publishing backend authenticates the acting user with a bearer token.
//! The token is resolved once, from `CROSSCAST_TOKEN` or the configured token
//! file, and held in a [`SecretString`] so it never lands in debug output.

use secrecy::{ExposeSecret, SecretString};

use crate::config::AuthConfig;
use crate::error::{PlatformError, Result};

/// Environment variable that overrides the token file.
pub const TOKEN_ENV: &str = "CROSSCAST_TOKEN";

#[derive(Clone)]
pub struct Session {
    token: Option<SecretString>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Resolve the session token: environment first, then the token file.
    ///
    /// A missing token is not an error here; it becomes one the moment an
    /// operation that needs authentication runs (`require_token`).
    pub fn resolve(auth: &AuthConfig) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            let token = token.trim();
            if !token.is_empty() {
                return Self::with_token(token);
            }
        }

        let path = shellexpand::tilde(&auth.token_file).to_string();
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    tracing::debug!("session token file {} is empty", path);
                    Self::anonymous()
                } else {
                    Self::with_token(token)
                }
            }
            Err(e) => {
                tracing::debug!("no session token file at {}: {}", path, e);
                Self::anonymous()
            }
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The session token, or an authentication error with remediation hints.
    pub fn require_token(&self) -> Result<&SecretString> {
        self.token.as_ref().ok_or_else(|| {
            PlatformError::Authentication(format!(
                "No session token found. Set {} or log in so the token file exists.",
                TOKEN_ENV
            ))
            .into()
        })
    }

    /// `Authorization` header value for backend requests.
    pub fn bearer_header(&self) -> Result<String> {
        Ok(format!("Bearer {}", self.require_token()?.expose_secret()))
    }
}
