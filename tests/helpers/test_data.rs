//! Test data fixtures

use serde_json::{json, Value};

pub const EVENT_ID: &str = "ev-reunion";

pub fn sample_alumni() -> Value {
    json!([
        {
            "id": "a1",
            "full_name": "Ana Pop",
            "graduation_year": 2020,
            "bacalaureat_passed": true,
            "path": "faculty",
            "email": "ana@x.ro",
            "phone": null
        },
        {
            "id": "a2",
            "full_name": "Ion Ionescu",
            "graduation_year": 2021,
            "bacalaureat_passed": false,
            "path": "employed",
            "email": null,
            "phone": "0722000000"
        },
        {
            "id": "a3",
            "full_name": "Maria \"Mia\" Stan",
            "graduation_year": 2020,
            "bacalaureat_passed": true,
            "path": "other",
            "email": "mia@example.com",
            "phone": null
        }
    ])
}

pub fn sample_event() -> Value {
    json!({
        "id": EVENT_ID,
        "title": "Reunion 2024",
        "date": "2024-06-01",
        "location": "Iasi",
        "description": "Ten years after"
    })
}

pub fn sample_events() -> Value {
    json!([sample_event()])
}

pub fn invitation_details(token: &str, rsvp_status: Option<&str>) -> Value {
    json!({
        "event": sample_event(),
        "invitation": {
            "id": "inv-1",
            "token": token,
            "event_id": EVENT_ID,
            "rsvp_status": rsvp_status
        }
    })
}

/// Fresh unique invitation token
pub fn random_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
