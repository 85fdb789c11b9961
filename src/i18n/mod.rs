//! Internationalization module
//!
//! Romanian and English UI strings, and the context that tracks which of
//! the two is active.

pub mod loader;
pub mod localizer;

pub use loader::{I18n, Language};
pub use localizer::Localizer;
