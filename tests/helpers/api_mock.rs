//! Mock registry API server for testing
//!
//! Wraps a wiremock server that answers the registry's REST endpoints under
//! `/api`. Each `mock_*` method mounts one endpoint.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

/// Mock registry API server
pub struct RegistryMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            custom_response: Some(body),
            ..Self::default()
        }
    }

    fn response(self, default_body: Value) -> ResponseTemplate {
        let body = if self.status < 300 {
            self.custom_response.unwrap_or(default_body)
        } else {
            self.custom_response.unwrap_or_else(|| json!({ "detail": "error" }))
        };

        let mut response = ResponseTemplate::new(self.status).set_body_json(body);
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }
        response
    }
}

impl RegistryMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure the client with
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn mock_health(&self, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(config.response(json!({ "message": "Alumni API running" })))
            .mount(&self.server)
            .await;
    }

    /// Accept exactly `username`/`password`, reject everything else with 401
    pub async fn mock_login(&self, username: &str, password: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": username, "password": password })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": TEST_ACCESS_TOKEN,
                "token_type": "bearer",
                "username": username
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .with_priority(2)
            .mount(&self.server)
            .await;
    }

    /// Answer every login with `body`
    pub async fn mock_login_response(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_alumni(&self, alumni: Value) {
        Mock::given(method("GET"))
            .and(path("/api/alumni"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alumni))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_alumnus(&self, created: Value) {
        Mock::given(method("POST"))
            .and(path("/api/alumni"))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(created))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_alumnus(&self, id: &str, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path(format!("/api/alumni/{}", id)))
            .respond_with(config.response(json!({})))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_update_alumnus(&self, id: &str, updated: Value) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/alumni/{}", id)))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete_alumnus(&self, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/alumni/{}", id)))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_events(&self, events: Value) {
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_event(&self, created: Value) {
        Mock::given(method("POST"))
            .and(path("/api/events"))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(created))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_invitation(&self, event_id: &str, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/invitations"))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .and(body_json(json!({ "event_id": event_id })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_invitation(&self, token: &str, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path(format!("/api/invitations/{}", token)))
            .respond_with(config.response(json!({})))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_rsvp(&self, token: &str, status: &str, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path(format!("/api/invitations/{}/rsvp", token)))
            .and(body_json(json!({ "status": status })))
            .respond_with(config.response(json!({ "invitation": { "rsvp_status": status } })))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn received(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
