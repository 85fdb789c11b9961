//! Invitation and RSVP models

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::RegistryError;
use super::event::Event;

/// An invitee's response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Yes,
    No,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(RsvpStatus::Yes),
            "no" => Ok(RsvpStatus::No),
            other => Err(RegistryError::InvalidInput(format!(
                "Invalid RSVP status '{}', expected yes or no",
                other
            ))),
        }
    }
}

/// Server-side invitation record; `rsvp_status` is `None` while unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(default)]
    pub id: String,
    pub token: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub rsvp_status: Option<RsvpStatus>,
    #[serde(default)]
    pub rsvp_at: Option<String>,
}

/// Body of `POST /api/invitations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitationRequest {
    pub event_id: String,
}

/// The part of the create response the client needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedInvitation {
    pub token: String,
}

/// Response of `GET /api/invitations/{token}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationDetails {
    pub event: Event,
    pub invitation: Invitation,
}

/// Body of `POST /api/invitations/{token}/rsvp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpRequest {
    pub status: RsvpStatus,
}

/// Response of the RSVP call; every level may be omitted by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RsvpResponse {
    #[serde(default)]
    pub invitation: Option<RsvpEcho>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RsvpEcho {
    #[serde(default)]
    pub rsvp_status: Option<RsvpStatus>,
}

impl RsvpResponse {
    /// Status echoed by the server, if any
    pub fn echoed_status(&self) -> Option<RsvpStatus> {
        self.invitation.as_ref().and_then(|i| i.rsvp_status)
    }
}
