//! Admin dashboard
//!
//! The top bar, the login card shown while signed out, the API status line
//! and the two panels, composed in one view.

use tracing::debug;
use crate::config::Settings;
use crate::i18n::Localizer;
use crate::services::{AuthService, ServiceFactory};
use crate::state::SessionStore;
use crate::utils::errors::Result;
use super::{AlumniPanel, EventsPanel};

/// Header line: app name, language toggle and login badge
pub fn top_bar(loc: &Localizer, session: &SessionStore) -> String {
    let badge = if session.is_authenticated() {
        format!("{}: {}", loc.t("logged_in_as"), session.username().unwrap_or_default())
    } else {
        loc.t("not_logged_in").to_string()
    };

    format!(
        "{}  [{}]  {}\n",
        loc.t("app_name"),
        loc.language().toggle_label(),
        badge
    )
}

/// Sign-in form
#[derive(Debug, Clone, Default)]
pub struct LoginCard {
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Localized error from the last attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Try the entered credentials
    ///
    /// On success the password is cleared and the username is returned.
    /// Any failure sets the localized invalid-credentials message.
    pub async fn submit(
        &mut self,
        auth: &AuthService,
        session: &mut SessionStore,
        loc: &Localizer,
    ) -> Result<String> {
        self.error = None;
        match auth.login(session, &self.username, &self.password).await {
            Ok(username) => {
                self.password.clear();
                Ok(username)
            }
            Err(e) => {
                self.error = Some(loc.t("invalid_credentials").to_string());
                Err(e)
            }
        }
    }

    pub async fn logout(&mut self, auth: &AuthService, session: &mut SessionStore) -> Result<()> {
        self.error = None;
        self.password.clear();
        auth.logout(session).await
    }

    pub fn render(&self, loc: &Localizer) -> String {
        let mut out = format!("{}\n", loc.t("login"));
        out.push_str(&format!("  {}: {}\n", loc.t("username"), self.username));
        out.push_str(&format!("  {}: {}\n", loc.t("password"), "*".repeat(self.password.chars().count())));
        if let Some(error) = &self.error {
            out.push_str(&format!("  ! {}\n", error));
        }
        out.push_str(&format!("  [{}]\n", loc.t("sign_in")));
        out
    }
}

/// Backend liveness line
#[derive(Debug, Clone, Default)]
pub struct StatusWidget {
    message: Option<String>,
}

impl StatusWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the API root for its status message; failures leave the placeholder
    pub async fn refresh(&mut self, services: &ServiceFactory) {
        self.message = services.health_check().await;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn render(&self, loc: &Localizer) -> String {
        format!("{}: {}\n", loc.t("status"), self.message.as_deref().unwrap_or("…"))
    }
}

/// Everything shown on `/`
#[derive(Debug)]
pub struct Dashboard {
    pub login: LoginCard,
    pub status: StatusWidget,
    pub alumni: AlumniPanel,
    pub events: EventsPanel,
}

impl Dashboard {
    pub fn new(settings: &Settings, services: &ServiceFactory) -> Result<Self> {
        Ok(Self {
            login: LoginCard::new(),
            status: StatusWidget::new(),
            alumni: AlumniPanel::new(services.api.clone(), settings.features.clone())?,
            events: EventsPanel::new(
                services.api.clone(),
                services.clipboard.clone(),
                settings.api.public_origin.clone(),
            ),
        })
    }

    /// Initial fetches, run concurrently
    ///
    /// List failures are logged and leave the panel empty, matching what a
    /// freshly opened dashboard shows when the API is down.
    pub async fn mount(&mut self, services: &ServiceFactory) {
        let (alumni, events, ()) = futures::join!(
            self.alumni.load(),
            self.events.load(),
            self.status.refresh(services),
        );

        for (panel, result) in [("alumni", alumni), ("events", events)] {
            if let Err(e) = result {
                debug!(panel = panel, error = %e, "Initial load failed");
            }
        }
    }

    pub fn render(&self, loc: &Localizer, session: &SessionStore) -> String {
        let mut out = top_bar(loc, session);
        out.push_str(&self.status.render(loc));
        out.push('\n');

        if !session.is_authenticated() {
            out.push_str(&self.login.render(loc));
            out.push('\n');
        }

        out.push_str(&self.alumni.render(loc));
        out.push('\n');
        out.push_str(&self.events.render(loc));
        out
    }
}
