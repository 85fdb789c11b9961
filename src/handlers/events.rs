//! Events panel
//!
//! Form and listing for events, plus invitation links: generating one asks
//! the API for a fresh token, builds the public `/invite/{token}` URL and
//! puts it on the clipboard.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use crate::i18n::Localizer;
use crate::models::{Event, EventDraft};
use crate::services::{ApiClient, Clipboard};
use crate::state::{SessionStore, TaskScope};
use crate::utils::errors::{RegistryError, Result};
use crate::utils::logging::log_admin_action;
use super::section_title;

/// How long an event's button reads "Copied!" after its link was copied
pub const COPIED_FLASH: Duration = Duration::from_millis(1500);

/// Public link for an invitation token
pub fn invite_link(public_origin: &str, token: &str) -> String {
    format!(
        "{}/invite/{}",
        public_origin.trim_end_matches('/'),
        urlencoding::encode(token)
    )
}

/// Events panel state
pub struct EventsPanel {
    api: ApiClient,
    clipboard: Arc<dyn Clipboard>,
    public_origin: String,
    scope: TaskScope,
    pub form: EventDraft,
    list: Vec<Event>,
    copied: Option<(String, Instant)>,
}

impl EventsPanel {
    pub fn new(api: ApiClient, clipboard: Arc<dyn Clipboard>, public_origin: impl Into<String>) -> Self {
        Self {
            api,
            clipboard,
            public_origin: public_origin.into(),
            scope: TaskScope::new("events"),
            form: EventDraft::default(),
            list: Vec::new(),
            copied: None,
        }
    }

    /// Fetch the full list
    pub async fn load(&mut self) -> Result<()> {
        let api = self.api.clone();
        let task = self.scope.spawn(async move { api.list_events().await });

        match task.join().await {
            Some(Ok(list)) => {
                debug!(count = list.len(), "Events loaded");
                self.list = list;
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => Ok(()),
        }
    }

    /// Submit the form, then clear it and reload
    pub async fn create(&mut self, session: &SessionStore) -> Result<Event> {
        let token = session.require_token()?.to_string();
        let form = self.form.to_form()?;

        let api = self.api.clone();
        let task = self
            .scope
            .spawn(async move { api.create_event(&token, &form).await });
        let created = task
            .join()
            .await
            .ok_or_else(|| RegistryError::InvalidInput("Events panel was closed".to_string()))??;

        log_admin_action(session.username(), "create_event", Some(&created.id));
        self.form = EventDraft::default();
        self.load().await?;
        Ok(created)
    }

    /// Fetch a single event
    pub async fn get(&self, id: &str) -> Result<Event> {
        self.api.get_event(id).await
    }

    /// Issue an invitation for `event_id` and copy its link
    pub async fn generate_link(&mut self, session: &SessionStore, event_id: &str) -> Result<String> {
        let token = session.require_token()?.to_string();

        let api = self.api.clone();
        let event = event_id.to_string();
        let task = self
            .scope
            .spawn(async move { api.create_invitation(&token, &event).await });
        let invitation_token = task
            .join()
            .await
            .ok_or_else(|| RegistryError::InvalidInput("Events panel was closed".to_string()))??;

        let link = invite_link(&self.public_origin, &invitation_token);
        self.clipboard.write_text(&link)?;
        self.copied = Some((event_id.to_string(), Instant::now()));

        log_admin_action(session.username(), "generate_invitation", Some(event_id));
        Ok(link)
    }

    /// True while `event_id`'s link was copied less than `COPIED_FLASH` ago
    pub fn is_copied(&self, event_id: &str) -> bool {
        self.copied
            .as_ref()
            .is_some_and(|(id, at)| id == event_id && at.elapsed() < COPIED_FLASH)
    }

    pub fn events(&self) -> &[Event] {
        &self.list
    }

    pub fn render(&self, loc: &Localizer) -> String {
        let mut out = section_title(loc.t("events"));

        for event in &self.list {
            let action = if self.is_copied(&event.id) {
                loc.t("copied")
            } else {
                loc.t("generate_link")
            };
            out.push_str(&format!("* {}  [{}: {}]\n", event.title, action, event.id));
            out.push_str(&format!("  {}\n", event.when_where()));
            if let Some(description) = &event.description {
                out.push_str(&format!("  {}\n", description));
            }
        }

        out
    }
}

impl std::fmt::Debug for EventsPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsPanel")
            .field("public_origin", &self.public_origin)
            .field("events", &self.list.len())
            .field("copied", &self.copied)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_link_format() {
        assert_eq!(
            invite_link("https://alumni.example.org/", "3f2a-11"),
            "https://alumni.example.org/invite/3f2a-11"
        );
        assert_eq!(invite_link("http://localhost:3000", "a/b"), "http://localhost:3000/invite/a%2Fb");
    }
}
