//! Application shell
//!
//! Routes a path to its page, mounts the page and renders it with the
//! active language. Errors reaching the user are mapped to localized text
//! here.

pub mod context;
pub mod router;

pub use context::AppContext;
pub use router::Route;

use tracing::debug;
use crate::handlers::{Dashboard, InvitationPage};
use crate::utils::errors::{RegistryError, Result};

/// Top-level application
#[derive(Debug)]
pub struct App {
    pub ctx: AppContext,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Render whatever page `path` points to
    pub async fn open(&self, path: &str) -> Result<String> {
        match Route::parse(path) {
            Route::Dashboard => {
                let dashboard = self.dashboard().await?;
                Ok(dashboard.render(&self.ctx.localizer, &self.ctx.session))
            }
            Route::Invite(token) => {
                let page = self.invitation(&token).await;
                Ok(page.render(&self.ctx.localizer))
            }
            Route::NotFound => Ok(format!("{}\n", self.ctx.localizer.t("page_not_found"))),
        }
    }

    /// Dashboard with its initial data loaded
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let mut dashboard = Dashboard::new(&self.ctx.settings, &self.ctx.services)?;
        dashboard.mount(&self.ctx.services).await;
        Ok(dashboard)
    }

    /// Invitation page for `token`, resolved
    pub async fn invitation(&self, token: &str) -> InvitationPage {
        let mut page = InvitationPage::new(
            self.ctx.services.api.clone(),
            self.ctx.settings.features.clone(),
            token,
        );
        page.load().await;
        page
    }

    /// Process exit status for a failed command: 1 when retrying may help, 2 otherwise
    pub fn exit_code(error: &RegistryError) -> i32 {
        if error.is_recoverable() {
            1
        } else {
            2
        }
    }

    /// Text shown to the user for a failed action
    pub fn describe_error(&self, error: &RegistryError) -> String {
        debug!(
            error = %error,
            severity = %error.severity(),
            recoverable = error.is_recoverable(),
            "Describing error"
        );
        let loc = &self.ctx.localizer;
        match error {
            RegistryError::LoginRequired => loc.t("login_required").to_string(),
            RegistryError::InvalidCredentials => loc.t("invalid_credentials").to_string(),
            RegistryError::NotFound(_) => loc.t("not_found").to_string(),
            other => other.to_string(),
        }
    }
}
