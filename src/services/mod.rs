//! Services module
//!
//! This module contains the client's collaborators: the REST API client,
//! authentication, and the clipboard and download side effects.

pub mod api;
pub mod auth;
pub mod clipboard;
pub mod downloads;

// Re-export commonly used services
pub use api::ApiClient;
pub use auth::AuthService;
pub use clipboard::{Clipboard, MemoryClipboard, TerminalClipboard};
pub use downloads::Downloads;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub clipboard: Arc<dyn Clipboard>,
    pub downloads: Downloads,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with a specific clipboard
    pub fn with_clipboard(settings: &Settings, clipboard: Arc<dyn Clipboard>) -> Result<Self> {
        let api = ApiClient::new(settings)?;
        let auth_service = AuthService::new(api.clone());
        let downloads = Downloads::new(settings.storage.downloads_dir.clone());

        Ok(Self {
            api,
            auth_service,
            clipboard,
            downloads,
        })
    }

    /// Liveness message for the status widget; `None` when unreachable
    pub async fn health_check(&self) -> Option<String> {
        match self.api.health().await {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!(error = %e, "Status check failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("api", &self.api)
            .field("downloads", &self.downloads)
            .finish_non_exhaustive()
    }
}
