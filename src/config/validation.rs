//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::i18n::Language;
use crate::utils::errors::{RegistryError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_storage_config(&settings.storage)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(RegistryError::Config(
            "API base URL is required".to_string()
        ));
    }

    let base = url::Url::parse(&config.base_url)?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(RegistryError::Config(
            format!("API base URL must use http or https, got {}", base.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(RegistryError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    url::Url::parse(&config.public_origin).map_err(|e| {
        RegistryError::Config(format!("Invalid public origin '{}': {}", config.public_origin, e))
    })?;

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.path.as_os_str().is_empty() {
        return Err(RegistryError::Config(
            "Storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(RegistryError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(RegistryError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(RegistryError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    for code in &config.supported_languages {
        if Language::from_code(code).is_none() {
            return Err(RegistryError::Config(
                format!("Unsupported language: {}. Valid languages: ro, en", code)
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RegistryError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RegistryError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
