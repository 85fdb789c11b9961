//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Registry API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin; endpoints live under `{base_url}/api`
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Origin used when building shareable invitation links
    pub public_origin: String,
}

/// Client-side persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub downloads_dir: PathBuf,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub search_filter: bool,
    pub csv_export: bool,
    pub rsvp: bool,
    pub pdf_export: bool,
}

impl Settings {
    /// Load settings from `config.toml` and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Load settings layered as defaults, optional file, environment
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("ALUMNI_REGISTRY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("i18n.supported_languages")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::RegistryError> {
        super::validation::validate_settings(self)
    }

    /// Root of the REST API, `{base_url}/api`
    pub fn api_root(&self) -> String {
        format!("{}/api", self.api.base_url.trim_end_matches('/'))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8001".to_string(),
                timeout_seconds: 10,
                public_origin: "http://localhost:3000".to_string(),
            },
            storage: StorageConfig {
                path: PathBuf::from(".alumni-registry/storage.json"),
                downloads_dir: PathBuf::from("."),
            },
            i18n: I18nConfig {
                default_language: "ro".to_string(),
                supported_languages: vec!["ro".to_string(), "en".to_string()],
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                file_path: None,
            },
            features: FeaturesConfig::default(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            search_filter: true,
            csv_export: true,
            rsvp: true,
            pdf_export: true,
        }
    }
}
