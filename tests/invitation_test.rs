//! Public invitation page against the mock API

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use alumni_registry::{
    export::INVITATION_PDF_FILE,
    handlers::InvitationState,
    models::RsvpStatus,
};

#[tokio::test]
#[serial]
async fn test_invitation_found() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(invitation_details(&token, None)))
        .await;

    let page = t.app.invitation(&token).await;
    assert_matches!(page.state(), InvitationState::Loaded(details) if details.event.id == EVENT_ID);
    assert_eq!(page.rsvp(), None);

    let text = page.render(&t.app.ctx.localizer);
    assert!(text.contains("REUNION 2024"));
    assert!(text.contains("2024-06-01 · Iasi"));
    assert!(text.contains("Ten years after"));
}

#[tokio::test]
#[serial]
async fn test_invitation_not_found() {
    let t = TestContext::new().await;
    t.mock.mock_get_invitation("gone", MockResponseConfig::failing(404)).await;

    let page = t.app.invitation("gone").await;
    assert_eq!(page.state(), &InvitationState::NotFound);
    assert_eq!(page.render(&t.app.ctx.localizer), format!("{}\n", t.app.ctx.localizer.t("not_found")));
}

#[tokio::test]
#[serial]
async fn test_invitation_server_error_reads_as_not_found() {
    let t = TestContext::new().await;
    t.mock.mock_get_invitation("boom", MockResponseConfig::failing(500)).await;

    let page = t.app.invitation("boom").await;
    assert_eq!(page.state(), &InvitationState::NotFound);
}

#[tokio::test]
#[serial]
async fn test_invitation_unreachable_api_reads_as_not_found() {
    let t = TestContext::with_settings(|s| s.api.base_url = "http://127.0.0.1:1".to_string()).await;

    let page = t.app.invitation("any-token").await;
    assert_eq!(page.state(), &InvitationState::NotFound);
    assert_eq!(page.render(&t.app.ctx.localizer), format!("{}\n", t.app.ctx.localizer.t("not_found")));
}

#[tokio::test]
#[serial]
async fn test_invitation_unexpected_body_reads_as_not_found() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(json!({ "detail": "ok", "items": [] })))
        .await;

    let page = t.app.invitation(&token).await;
    assert_eq!(page.state(), &InvitationState::NotFound);
    assert_eq!(page.render(&t.app.ctx.localizer), format!("{}\n", t.app.ctx.localizer.t("not_found")));
}

#[tokio::test]
#[serial]
async fn test_invitation_with_free_form_date() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(
            &token,
            MockResponseConfig::with_body(json!({
                "event": { "id": "e2", "title": "Picnic", "date": "", "location": "Cluj" },
                "invitation": { "id": "inv-2", "token": token, "event_id": "e2", "rsvp_status": null }
            })),
        )
        .await;

    let page = t.app.invitation(&token).await;
    assert_matches!(page.state(), InvitationState::Loaded(details) if details.event.date.is_empty());

    let text = page.render(&t.app.ctx.localizer);
    assert!(text.contains("PICNIC"));
    assert!(text.contains(" · Cluj"));
    assert!(!text.contains(t.app.ctx.localizer.t("not_found")));
}

#[tokio::test]
#[serial]
async fn test_rsvp_uses_echoed_status() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(invitation_details(&token, Some("no"))))
        .await;
    t.mock.mock_rsvp(&token, "yes", MockResponseConfig::default()).await;

    let mut page = t.app.invitation(&token).await;
    assert_eq!(page.rsvp(), Some(RsvpStatus::No));

    assert_eq!(page.submit_rsvp(RsvpStatus::Yes).await, Some(RsvpStatus::Yes));
    // Same answer again is accepted and changes nothing
    assert_eq!(page.submit_rsvp(RsvpStatus::Yes).await, Some(RsvpStatus::Yes));
}

#[tokio::test]
#[serial]
async fn test_rsvp_falls_back_to_submitted_value() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(invitation_details(&token, None)))
        .await;
    t.mock.mock_rsvp(&token, "no", MockResponseConfig::with_body(json!({}))).await;

    let mut page = t.app.invitation(&token).await;
    assert_eq!(page.submit_rsvp(RsvpStatus::No).await, Some(RsvpStatus::No));
}

#[tokio::test]
#[serial]
async fn test_rsvp_failure_keeps_previous_status() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(invitation_details(&token, Some("yes"))))
        .await;
    t.mock.mock_rsvp(&token, "no", MockResponseConfig::failing(500)).await;

    let mut page = t.app.invitation(&token).await;
    assert_eq!(page.submit_rsvp(RsvpStatus::No).await, Some(RsvpStatus::Yes));
    assert_eq!(page.rsvp(), Some(RsvpStatus::Yes));
}

#[tokio::test]
#[serial]
async fn test_rsvp_disabled_sends_nothing() {
    let t = TestContext::with_settings(|s| s.features.rsvp = false).await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(invitation_details(&token, None)))
        .await;

    let mut page = t.app.invitation(&token).await;
    assert_eq!(page.submit_rsvp(RsvpStatus::Yes).await, None);

    let posts = t
        .mock
        .received()
        .await
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 0);
}

#[tokio::test]
#[serial]
async fn test_pdf_export() {
    let t = TestContext::new().await;
    let token = random_token();
    t.mock
        .mock_get_invitation(&token, MockResponseConfig::with_body(invitation_details(&token, Some("yes"))))
        .await;

    let mut page = t.app.invitation(&token).await;
    let path = page
        .export_pdf(&t.app.ctx.localizer, &t.app.ctx.services.downloads)
        .await
        .unwrap();

    assert_eq!(path, t.downloads_dir().join(INVITATION_PDF_FILE));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.len() > 500);
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(!page.is_saving_pdf());
}
