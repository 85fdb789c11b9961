//! Test context setup
//!
//! A context bundles a mock API, a temporary state/downloads directory and
//! an application context wired to both, with an in-memory clipboard.

use std::sync::Arc;
use tempfile::TempDir;
use alumni_registry::{
    config::Settings,
    services::MemoryClipboard,
    shell::{App, AppContext},
};
use super::api_mock::{RegistryMockServer, TEST_ACCESS_TOKEN};

pub struct TestContext {
    pub mock: RegistryMockServer,
    pub dir: TempDir,
    pub clipboard: Arc<MemoryClipboard>,
    pub app: App,
}

/// Settings pointing at `api_uri` and keeping all files inside `dir`
pub fn test_settings(api_uri: &str, dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = api_uri.to_string();
    settings.api.timeout_seconds = 5;
    settings.api.public_origin = "http://alumni.test".to_string();
    settings.storage.path = dir.path().join("state").join("storage.json");
    settings.storage.downloads_dir = dir.path().join("downloads");
    settings
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_settings(|_| {}).await
    }

    /// Build a context after letting `adjust` tweak the settings
    pub async fn with_settings(adjust: impl FnOnce(&mut Settings)) -> Self {
        super::init_test_logging();

        let mock = RegistryMockServer::new().await;
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut settings = test_settings(&mock.uri(), &dir);
        adjust(&mut settings);

        let clipboard = Arc::new(MemoryClipboard::new());
        let ctx = AppContext::init(settings, clipboard.clone())
            .await
            .expect("Failed to build app context");

        Self {
            mock,
            dir,
            clipboard,
            app: App::new(ctx),
        }
    }

    /// Put a session in place without going through the login endpoint
    pub async fn sign_in(&mut self) {
        self.app
            .ctx
            .session
            .set_auth(Some(TEST_ACCESS_TOKEN), Some("admin"))
            .await
            .expect("Failed to store session");
    }

    pub fn downloads_dir(&self) -> std::path::PathBuf {
        self.app.ctx.settings.storage.downloads_dir.clone()
    }
}
