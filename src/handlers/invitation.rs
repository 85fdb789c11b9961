//! Public invitation page
//!
//! Resolves the invitation token from the route, shows the event and the
//! current RSVP status, accepts an RSVP and exports the card to PDF. A
//! failed lookup of any kind shows the localized not-found message; a
//! failed RSVP leaves the displayed status untouched.

use std::path::PathBuf;
use tracing::{debug, info, warn};
use crate::config::FeaturesConfig;
use crate::export::pdf::{render_card_pdf, Card, LineStyle, INVITATION_PDF_FILE};
use crate::i18n::Localizer;
use crate::models::{InvitationDetails, RsvpStatus};
use crate::services::{ApiClient, Downloads};
use crate::state::TaskScope;
use crate::utils::errors::{RegistryError, Result};
use crate::utils::logging::log_swallowed_error;

/// What the page currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationState {
    Loading,
    Loaded(InvitationDetails),
    NotFound,
}

/// Invitation page state for one token
#[derive(Debug)]
pub struct InvitationPage {
    api: ApiClient,
    features: FeaturesConfig,
    scope: TaskScope,
    token: String,
    state: InvitationState,
    rsvp: Option<RsvpStatus>,
    saving_pdf: bool,
}

impl InvitationPage {
    pub fn new(api: ApiClient, features: FeaturesConfig, token: impl Into<String>) -> Self {
        Self {
            api,
            features,
            scope: TaskScope::new("invitation"),
            token: token.into(),
            state: InvitationState::Loading,
            rsvp: None,
            saving_pdf: false,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn state(&self) -> &InvitationState {
        &self.state
    }

    /// Displayed RSVP status; `None` is unset
    pub fn rsvp(&self) -> Option<RsvpStatus> {
        self.rsvp
    }

    /// Point the page at another token
    ///
    /// Work still in flight for the previous token is dropped. Returns
    /// whether the token changed; call `load` afterwards when it did.
    pub fn set_token(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if token == self.token {
            return false;
        }
        self.scope.supersede();
        self.token = token;
        self.state = InvitationState::Loading;
        self.rsvp = None;
        true
    }

    /// Resolve the current token, once
    pub async fn load(&mut self) {
        let api = self.api.clone();
        let token = self.token.clone();
        let task = self.scope.spawn(async move { api.get_invitation(&token).await });

        match task.join().await {
            Some(Ok(details)) => {
                debug!(token = %self.token, event_id = %details.event.id, "Invitation resolved");
                self.rsvp = details.invitation.rsvp_status;
                self.state = InvitationState::Loaded(details);
            }
            Some(Err(e)) => {
                if e.is_not_found() {
                    debug!(token = %self.token, "Invitation does not exist");
                } else {
                    warn!(token = %self.token, error = %e, "Invitation lookup failed");
                }
                self.state = InvitationState::NotFound;
            }
            None => {}
        }
    }

    /// Record a response; failures keep the previous status
    pub async fn submit_rsvp(&mut self, status: RsvpStatus) -> Option<RsvpStatus> {
        if !self.features.rsvp {
            debug!("RSVP is disabled");
            return self.rsvp;
        }

        let api = self.api.clone();
        let token = self.token.clone();
        let task = self
            .scope
            .spawn(async move { api.submit_rsvp(&token, status).await });

        match task.join().await {
            Some(Ok(response)) => {
                let shown = response.echoed_status().unwrap_or(status);
                info!(token = %self.token, status = %shown, "RSVP recorded");
                self.rsvp = Some(shown);
            }
            Some(Err(e)) => log_swallowed_error("rsvp", &e.to_string()),
            None => {}
        }

        self.rsvp
    }

    /// The card as it is rendered, `None` until the invitation is loaded
    pub fn card(&self, loc: &Localizer) -> Option<Card> {
        let InvitationState::Loaded(details) = &self.state else {
            return None;
        };
        let event = &details.event;

        let mut card = Card::new()
            .line(LineStyle::Heading, loc.t("invitation_for"))
            .line(LineStyle::Muted, format!("{}:", loc.t("minimal_invite_text")))
            .line(LineStyle::Title, event.title.as_str())
            .line(LineStyle::Muted, event.when_where());
        if let Some(description) = &event.description {
            card = card.line(LineStyle::Body, description.as_str());
        }
        card = card.rule().line(
            LineStyle::Body,
            format!(
                "{}: {}",
                loc.t("rsvp_status"),
                self.rsvp.map(|s| s.as_str()).unwrap_or("-")
            ),
        );

        Some(card)
    }

    /// Write the rendered card to `invitation.pdf`
    pub async fn export_pdf(&mut self, loc: &Localizer, downloads: &Downloads) -> Result<PathBuf> {
        if !self.features.pdf_export {
            return Err(RegistryError::InvalidInput("PDF export is disabled".to_string()));
        }
        if self.saving_pdf {
            return Err(RegistryError::InvalidInput("PDF export already in progress".to_string()));
        }
        let card = self
            .card(loc)
            .ok_or_else(|| RegistryError::NotFound("invitation".to_string()))?;

        self.saving_pdf = true;
        let bytes = render_card_pdf(&card);
        let result = downloads.save("pdf", INVITATION_PDF_FILE, &bytes).await;
        self.saving_pdf = false;

        result
    }

    pub fn is_saving_pdf(&self) -> bool {
        self.saving_pdf
    }

    pub fn render(&self, loc: &Localizer) -> String {
        match &self.state {
            InvitationState::Loading => format!("{}\n", loc.t("loading")),
            InvitationState::NotFound => format!("{}\n", loc.t("not_found")),
            InvitationState::Loaded(_) => {
                let mut out = String::new();
                if let Some(card) = self.card(loc) {
                    for line in &card.lines {
                        match line.style {
                            LineStyle::Rule => out.push_str(&format!("{}\n", "-".repeat(40))),
                            LineStyle::Title => out.push_str(&format!("{}\n", line.text.to_uppercase())),
                            _ => out.push_str(&format!("{}\n", line.text)),
                        }
                    }
                }

                let mut actions = Vec::new();
                if self.features.pdf_export {
                    actions.push(format!("[{}]", loc.t("download_pdf")));
                }
                if self.features.rsvp {
                    actions.push(format!("[{}]", loc.t("rsvp_yes")));
                    actions.push(format!("[{}]", loc.t("rsvp_no")));
                }
                if !actions.is_empty() {
                    out.push_str(&format!("{}\n", actions.join(" ")));
                }
                out
            }
        }
    }
}
