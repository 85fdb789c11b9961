//! Data models module
//!
//! Wire types exchanged with the registry API. The API owns every record;
//! the client only reads them and submits forms.

pub mod alumnus;
pub mod auth;
pub mod event;
pub mod invitation;

// Re-export commonly used models
pub use alumnus::{Alumnus, AlumnusForm, GraduatePath};
pub use auth::{LoginRequest, LoginResponse, StatusMessage};
pub use event::{parse_date, Event, EventDraft, EventForm};
pub use invitation::{CreateInvitationRequest, CreatedInvitation, Invitation, InvitationDetails, RsvpRequest, RsvpResponse, RsvpStatus};
