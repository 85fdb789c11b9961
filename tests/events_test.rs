//! Events panel and invitation links

mod helpers;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use alumni_registry::{
    handlers::EventsPanel,
    models::EventDraft,
    RegistryError,
};

fn panel(t: &TestContext) -> EventsPanel {
    let ctx = &t.app.ctx;
    EventsPanel::new(
        ctx.services.api.clone(),
        ctx.services.clipboard.clone(),
        ctx.settings.api.public_origin.clone(),
    )
}

#[tokio::test]
#[serial]
async fn test_generate_link_copies_to_clipboard() {
    let mut t = TestContext::new().await;
    t.sign_in().await;
    let token = random_token();
    t.mock.mock_list_events(sample_events()).await;
    t.mock.mock_create_invitation(EVENT_ID, &token).await;

    let mut panel = panel(&t);
    panel.load().await.unwrap();

    let link = panel.generate_link(&t.app.ctx.session, EVENT_ID).await.unwrap();
    assert_eq!(link, format!("http://alumni.test/invite/{}", token));
    assert_eq!(t.clipboard.contents(), Some(link));

    assert!(panel.is_copied(EVENT_ID));
    assert!(!panel.is_copied("other-event"));
    let loc = &t.app.ctx.localizer;
    assert!(panel.render(loc).contains(loc.t("copied")));
}

#[tokio::test]
#[serial]
async fn test_generate_link_failure_leaves_clipboard_alone() {
    let mut t = TestContext::new().await;
    t.sign_in().await;

    let mut panel = panel(&t);
    let result = panel.generate_link(&t.app.ctx.session, "missing").await;

    assert_matches!(result, Err(RegistryError::NotFound(_)));
    assert_eq!(t.clipboard.contents(), None);
    assert!(!panel.is_copied("missing"));
}

#[tokio::test]
#[serial]
async fn test_create_event_clears_form() {
    let mut t = TestContext::new().await;
    t.sign_in().await;
    t.mock.mock_list_events(sample_events()).await;
    t.mock.mock_create_event(sample_event()).await;

    let mut panel = panel(&t);
    panel.form = EventDraft {
        title: "Reunion 2024".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1),
        location: "Iasi".to_string(),
        description: Some("   ".to_string()),
    };

    let created = panel.create(&t.app.ctx.session).await.unwrap();
    assert_eq!(created.id, EVENT_ID);
    assert_eq!(panel.form, EventDraft::default());
    assert_eq!(panel.events().len(), 1);

    let request = t
        .mock
        .received()
        .await
        .into_iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["date"], json!("2024-06-01"));
    assert_eq!(body["description"], json!(null));
}

#[tokio::test]
#[serial]
async fn test_create_event_requires_date() {
    let mut t = TestContext::new().await;
    t.sign_in().await;

    let mut panel = panel(&t);
    panel.form.title = "Reunion".to_string();
    panel.form.location = "Iasi".to_string();

    assert_matches!(panel.create(&t.app.ctx.session).await, Err(RegistryError::InvalidInput(_)));
    assert!(t.mock.received().await.is_empty());
}

#[tokio::test]
#[serial]
async fn test_list_keeps_events_with_free_form_dates() {
    let t = TestContext::new().await;
    t.mock
        .mock_list_events(json!([
            sample_event(),
            { "id": "e2", "title": "Picnic", "date": "", "location": "Cluj" }
        ]))
        .await;

    let mut panel = panel(&t);
    panel.load().await.unwrap();
    assert_eq!(panel.events().len(), 2);
    assert!(panel.render(&t.app.ctx.localizer).contains(" · Cluj"));
}
