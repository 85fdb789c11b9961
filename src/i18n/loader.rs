//! Translation tables
//!
//! The UI strings for both supported languages ship inside the binary as
//! flat JSON objects. Lookups are by key with no pluralization,
//! interpolation, or cross-language fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::utils::errors::{RegistryError, Result};

const RO_TRANSLATIONS: &str = include_str!("../../translations/ro.json");
const EN_TRANSLATIONS: &str = include_str!("../../translations/en.json");

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ro,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ro, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Ro => "ro",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ro" => Some(Language::Ro),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// The other language
    pub fn toggled(self) -> Self {
        match self {
            Language::Ro => Language::En,
            Language::En => Language::Ro,
        }
    }

    /// Label of the toggle button, current language first
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::Ro => "RO / EN",
            Language::En => "EN / RO",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Language code to flat string table
#[derive(Debug, Clone)]
pub struct I18n {
    translations: Arc<HashMap<Language, HashMap<String, String>>>,
}

impl I18n {
    /// Load the built-in translation tables
    pub fn load() -> Result<Self> {
        let mut translations = HashMap::new();
        translations.insert(Language::Ro, Self::parse_table(Language::Ro, RO_TRANSLATIONS)?);
        translations.insert(Language::En, Self::parse_table(Language::En, EN_TRANSLATIONS)?);

        Ok(Self {
            translations: Arc::new(translations),
        })
    }

    fn parse_table(lang: Language, content: &str) -> Result<HashMap<String, String>> {
        let table: HashMap<String, String> = serde_json::from_str(content).map_err(|e| {
            RegistryError::Config(format!("Invalid translation table for {}: {}", lang, e))
        })?;
        debug!("Loaded {} translation keys for {}", table.len(), lang);
        Ok(table)
    }

    /// Look up `key`; a missing key renders as the key itself
    pub fn t<'a>(&'a self, key: &'a str, lang: Language) -> &'a str {
        match self.translations.get(&lang).and_then(|table| table.get(key)) {
            Some(text) => text.as_str(),
            None => {
                warn!("Translation key '{}' not found for {}", key, lang);
                key
            }
        }
    }

    /// Keys present in one language but not the other
    pub fn missing_keys(&self) -> Vec<(Language, String)> {
        let mut missing = Vec::new();
        for lang in Language::ALL {
            let Some(table) = self.translations.get(&lang) else {
                continue;
            };
            for other in Language::ALL.into_iter().filter(|l| *l != lang) {
                if let Some(other_table) = self.translations.get(&other) {
                    for key in other_table.keys() {
                        if !table.contains_key(key) {
                            missing.push((lang, key.clone()));
                        }
                    }
                }
            }
        }
        missing.sort_by(|a, b| a.1.cmp(&b.1));
        missing
    }
}
