//! Authentication service implementation
//!
//! Exchanges credentials for a bearer token and keeps the session store in
//! step with the outcome. The API's reason for a rejected login is never
//! surfaced; every failure reads as invalid credentials.

use tracing::{info, warn};
use crate::state::SessionStore;
use crate::utils::errors::{RegistryError, Result};
use super::api::ApiClient;

/// Authentication service for login and logout
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in and store the returned session
    pub async fn login(&self, session: &mut SessionStore, username: &str, password: &str) -> Result<String> {
        let response = match self.api.login(username, password).await {
            Ok(response) => response,
            Err(e) => {
                warn!(username = username, error = %e, "Login failed");
                return Err(RegistryError::InvalidCredentials);
            }
        };

        if response.access_token.is_empty() {
            warn!(username = username, "Login response carried no access token");
            return Err(RegistryError::InvalidCredentials);
        }

        session
            .set_auth(Some(&response.access_token), Some(&response.username))
            .await?;

        info!(username = %response.username, token_type = %response.token_type, "Logged in");
        Ok(response.username)
    }

    /// Forget the stored session
    pub async fn logout(&self, session: &mut SessionStore) -> Result<()> {
        let username = session.username().map(str::to_string);
        session.clear().await?;
        info!(username = ?username, "Logged out");
        Ok(())
    }
}
