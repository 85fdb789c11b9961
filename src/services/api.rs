//! Registry REST API client
//!
//! Thin typed wrapper over the backend endpoints. Authenticated calls take
//! the bearer token explicitly; deciding whether one is available is the
//! caller's job (see `SessionStore::require_token`).

use std::time::Duration;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use crate::config::Settings;
use crate::models::{
    Alumnus, AlumnusForm, CreateInvitationRequest, CreatedInvitation, Event, EventForm,
    InvitationDetails, LoginRequest, LoginResponse, RsvpRequest, RsvpResponse, RsvpStatus,
    StatusMessage,
};
use crate::utils::errors::{RegistryError, Result};

/// HTTP client for the registry API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_root: String,
}

impl ApiClient {
    /// Create a new client from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_root = settings.api_root();
        url::Url::parse(&api_root)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent(concat!("alumni-registry/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RegistryError::Http)?;

        Ok(Self { client, api_root })
    }

    /// `{api_root}/{segment}/{segment}...` with each segment percent-encoded
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.api_root.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        debug!(method = %method, url = %url, authenticated = token.is_some(), "API request");
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-success statuses to errors
    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), what = what, "API call failed");

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(what.to_string()));
        }

        Err(RegistryError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], what: &str) -> Result<T> {
        let url = self.url(segments);
        let response = self.request(Method::GET, &url, None).send().await?;
        let response = Self::check(response, what).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        token: Option<&str>,
        what: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments);
        let response = self.request(method, &url, token).json(body).send().await?;
        let response = Self::check(response, what).await?;
        Ok(response.json().await?)
    }

    /// Liveness message from `GET /api/`
    pub async fn health(&self) -> Result<String> {
        let url = format!("{}/", self.api_root);
        let response = self.request(Method::GET, &url, None).send().await?;
        let response = Self::check(response, "status").await?;
        let status: StatusMessage = response.json().await?;
        Ok(status.message)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, &["auth", "login"], &body, None, "login").await
    }

    pub async fn list_alumni(&self) -> Result<Vec<Alumnus>> {
        self.get_json(&["alumni"], "alumni").await
    }

    pub async fn get_alumnus(&self, id: &str) -> Result<Alumnus> {
        self.get_json(&["alumni", id], "alumnus").await
    }

    pub async fn create_alumnus(&self, token: &str, form: &AlumnusForm) -> Result<Alumnus> {
        self.send_json(Method::POST, &["alumni"], form, Some(token), "alumnus").await
    }

    pub async fn update_alumnus(&self, token: &str, id: &str, form: &AlumnusForm) -> Result<Alumnus> {
        self.send_json(Method::PUT, &["alumni", id], form, Some(token), "alumnus").await
    }

    pub async fn delete_alumnus(&self, token: &str, id: &str) -> Result<()> {
        let url = self.url(&["alumni", id]);
        let response = self.request(Method::DELETE, &url, Some(token)).send().await?;
        Self::check(response, "alumnus").await?;
        Ok(())
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.get_json(&["events"], "events").await
    }

    pub async fn get_event(&self, id: &str) -> Result<Event> {
        self.get_json(&["events", id], "event").await
    }

    pub async fn create_event(&self, token: &str, form: &EventForm) -> Result<Event> {
        self.send_json(Method::POST, &["events"], form, Some(token), "event").await
    }

    /// Issue an invitation for `event_id`, returning its token
    pub async fn create_invitation(&self, token: &str, event_id: &str) -> Result<String> {
        let body = CreateInvitationRequest {
            event_id: event_id.to_string(),
        };
        let created: CreatedInvitation = self
            .send_json(Method::POST, &["invitations"], &body, Some(token), "event")
            .await?;
        Ok(created.token)
    }

    pub async fn get_invitation(&self, invitation_token: &str) -> Result<InvitationDetails> {
        self.get_json(&["invitations", invitation_token], "invitation").await
    }

    pub async fn submit_rsvp(&self, invitation_token: &str, status: RsvpStatus) -> Result<RsvpResponse> {
        let body = RsvpRequest { status };
        self.send_json(
            Method::POST,
            &["invitations", invitation_token, "rsvp"],
            &body,
            None,
            "invitation",
        )
        .await
    }
}
