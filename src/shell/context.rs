//! Application context
//!
//! Everything a page needs, built once at startup from the settings.

use std::sync::Arc;
use tracing::{debug, info};
use crate::config::Settings;
use crate::i18n::{I18n, Localizer};
use crate::services::{Clipboard, ServiceFactory};
use crate::state::{SessionStore, StateStorage};
use crate::utils::errors::Result;

#[derive(Debug)]
pub struct AppContext {
    pub settings: Settings,
    pub services: ServiceFactory,
    pub storage: StateStorage,
    pub session: SessionStore,
    pub localizer: Localizer,
}

impl AppContext {
    /// Open persisted state and wire the services
    pub async fn init(settings: Settings, clipboard: Arc<dyn Clipboard>) -> Result<Self> {
        let storage = StateStorage::open(&settings.storage.path).await?;
        debug!(path = %settings.storage.path.display(), "State storage opened");

        let services = ServiceFactory::with_clipboard(&settings, clipboard)?;
        let i18n = I18n::load()?;
        let localizer = Localizer::from_storage(i18n, storage.clone(), &settings.i18n).await;
        let session = SessionStore::from_storage(storage.clone()).await;

        info!(
            language = %localizer.language(),
            authenticated = session.is_authenticated(),
            "Application context ready"
        );

        Ok(Self {
            settings,
            services,
            storage,
            session,
            localizer,
        })
    }
}
