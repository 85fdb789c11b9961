//! Client state module
//!
//! This module owns everything the client keeps between interactions:
//! persisted key-value storage, the session, and per-component task scopes.

pub mod scope;
pub mod session;
pub mod storage;

pub use scope::{ScopedTask, TaskScope};
pub use session::{Session, SessionStore};
pub use storage::StateStorage;
