//! Error handling for the alumni registry client
//!
//! This module defines the main error type used throughout the client
//! and the severity/recoverability classification used when reporting it.

use thiserror::Error;

/// Main error type for the alumni registry client
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Login required")]
    LoginRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Check if the error is recoverable by a fresh user action
    pub fn is_recoverable(&self) -> bool {
        match self {
            RegistryError::Http(_) => true,
            RegistryError::Api { status, .. } => *status >= 500,
            RegistryError::NotFound(_) => false,
            RegistryError::LoginRequired => true,
            RegistryError::InvalidCredentials => true,
            RegistryError::Config(_) => false,
            RegistryError::ConfigSource(_) => false,
            RegistryError::Serialization(_) => false,
            RegistryError::Io(_) => true,
            RegistryError::UrlParse(_) => false,
            RegistryError::InvalidInput(_) => true,
            RegistryError::Export(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::Config(_) | RegistryError::ConfigSource(_) => ErrorSeverity::Critical,
            RegistryError::LoginRequired | RegistryError::InvalidCredentials => ErrorSeverity::Warning,
            RegistryError::NotFound(_) => ErrorSeverity::Warning,
            RegistryError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// True when the API reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        match self {
            RegistryError::NotFound(_) => true,
            RegistryError::Api { status, .. } => *status == 404,
            _ => false,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
