//! Active-language context
//!
//! Couples the translation tables with the persisted language preference.

use tracing::info;
use crate::config::I18nConfig;
use crate::state::StateStorage;
use crate::utils::errors::Result;
use super::loader::{I18n, Language};

const LANG_KEY: &str = "lang";

/// Localization context initialized from storage
#[derive(Debug, Clone)]
pub struct Localizer {
    i18n: I18n,
    language: Language,
    storage: StateStorage,
}

impl Localizer {
    /// Restore the persisted language, falling back to the configured default
    pub async fn from_storage(i18n: I18n, storage: StateStorage, config: &I18nConfig) -> Self {
        let default = Language::from_code(&config.default_language).unwrap_or(Language::Ro);
        let language = storage
            .get(LANG_KEY)
            .await
            .and_then(|code| Language::from_code(&code))
            .filter(|lang| config.supported_languages.iter().any(|s| s == lang.code()))
            .unwrap_or(default);

        Self { i18n, language, storage }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch to the other language and persist the choice
    pub async fn toggle(&mut self) -> Result<Language> {
        let next = self.language.toggled();
        self.set_language(next).await?;
        Ok(next)
    }

    /// Select a language and persist the choice
    pub async fn set_language(&mut self, language: Language) -> Result<()> {
        self.storage.set(LANG_KEY, language.code()).await?;
        self.language = language;
        info!(language = %language, "Language changed");
        Ok(())
    }

    /// Translate `key` in the active language
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.i18n.t(key, self.language)
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[tokio::test]
    async fn test_defaults_to_configured_language() {
        let settings = Settings::default();
        let localizer = Localizer::from_storage(I18n::load().unwrap(), StateStorage::in_memory(), &settings.i18n).await;
        assert_eq!(localizer.language(), Language::Ro);
        assert_eq!(localizer.t("yes"), "Da");
    }

    #[tokio::test]
    async fn test_toggle_is_persisted() {
        let settings = Settings::default();
        let storage = StateStorage::in_memory();
        let mut localizer = Localizer::from_storage(I18n::load().unwrap(), storage.clone(), &settings.i18n).await;

        assert_eq!(localizer.toggle().await.unwrap(), Language::En);
        assert_eq!(localizer.t("yes"), "Yes");
        assert_eq!(storage.get("lang").await, Some("en".to_string()));

        let restored = Localizer::from_storage(I18n::load().unwrap(), storage, &settings.i18n).await;
        assert_eq!(restored.language(), Language::En);
    }

    #[tokio::test]
    async fn test_unknown_persisted_language_is_ignored() {
        let settings = Settings::default();
        let storage = StateStorage::in_memory();
        storage.set("lang", "de").await.unwrap();
        let localizer = Localizer::from_storage(I18n::load().unwrap(), storage, &settings.i18n).await;
        assert_eq!(localizer.language(), Language::Ro);
    }
}
