//! Alumni Registry
//!
//! Administrative client for an alumni and events registry. Admins sign in,
//! record alumni and events, and hand out invitation links; guests open a
//! link to see the event, answer yes or no, and save the card as a PDF.
//! The UI is bilingual (Romanian and English).

pub mod config;
pub mod export;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod services;
pub mod shell;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RegistryError, Result};

// Re-export main components for easy access
pub use i18n::{I18n, Language, Localizer};
pub use services::ServiceFactory;
pub use shell::{App, AppContext, Route};
pub use state::{SessionStore, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
