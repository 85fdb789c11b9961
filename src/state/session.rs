//! Session store
//!
//! Holds the opaque bearer token and display name of the logged-in
//! administrator, persisted across runs. The token is never inspected;
//! a stale token only shows up as a failed authenticated request.

use serde::{Deserialize, Serialize};
use tracing::info;
use crate::utils::errors::{RegistryError, Result};
use super::storage::StateStorage;

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";

/// Snapshot of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session context initialized from storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: StateStorage,
    session: Session,
}

impl SessionStore {
    /// Restore the session persisted in `storage`
    pub async fn from_storage(storage: StateStorage) -> Self {
        let token = storage.get(TOKEN_KEY).await.filter(|t| !t.is_empty());
        let username = storage.get(USERNAME_KEY).await;

        Self {
            storage,
            session: Session { token, username },
        }
    }

    /// Set or clear the session
    ///
    /// An empty or absent token clears both persisted entries together.
    pub async fn set_auth(&mut self, token: Option<&str>, username: Option<&str>) -> Result<()> {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                let username = username.unwrap_or_default();
                self.storage
                    .set_many(&[(TOKEN_KEY, token), (USERNAME_KEY, username)])
                    .await?;
                self.session = Session {
                    token: Some(token.to_string()),
                    username: Some(username.to_string()),
                };
                info!(username = username, "Session stored");
            }
            None => self.clear().await?,
        }
        Ok(())
    }

    /// Destroy the session
    pub async fn clear(&mut self) -> Result<()> {
        self.storage.remove_many(&[TOKEN_KEY, USERNAME_KEY]).await?;
        self.session = Session::default();
        info!("Session cleared");
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Pre-flight guard for mutating calls
    pub fn require_token(&self) -> Result<&str> {
        self.token().ok_or(RegistryError::LoginRequired)
    }
}
