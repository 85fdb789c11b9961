//! Event model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{RegistryError, Result};
use super::alumnus::normalize_optional;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Free-form on the server; `YYYY-MM-DD` when created through this client
    #[serde(default)]
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Event {
    /// `date · location` line shown under the title
    pub fn when_where(&self) -> String {
        format!("{} · {}", self.date, self.location)
    }
}

/// Body of `POST /api/events`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: Option<String>,
}

impl EventForm {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.location = self.location.trim().to_string();
        self.description = normalize_optional(self.description);
        self
    }
}

/// Event form as being filled in; the date may still be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub location: String,
    pub description: Option<String>,
}

impl EventDraft {
    /// Validate into a submittable form
    pub fn to_form(&self) -> Result<EventForm> {
        let form = EventForm {
            title: self.title.clone(),
            date: self
                .date
                .ok_or_else(|| RegistryError::InvalidInput("Event date is required".to_string()))?,
            location: self.location.clone(),
            description: self.description.clone(),
        }
        .normalized();

        if form.title.is_empty() {
            return Err(RegistryError::InvalidInput("Event title is required".to_string()));
        }
        if form.location.is_empty() {
            return Err(RegistryError::InvalidInput("Event location is required".to_string()));
        }
        Ok(form)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| RegistryError::InvalidInput(format!("Invalid date '{}': {}", value, e)))
}
