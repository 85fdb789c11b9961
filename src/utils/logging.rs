//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging helpers
//! for the registry client. Console output goes to stderr so rendered views
//! and exported data on stdout stay clean.

use std::path::Path;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{RegistryError, Result};

/// Initialize logging based on configuration
///
/// The returned guard must be kept alive for the file writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| RegistryError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(file_path) if !file_path.is_empty() => {
            let path = Path::new(file_path);
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "alumni-registry.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| RegistryError::Config(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log authenticated administrative actions
pub fn log_admin_action(username: Option<&str>, action: &str, target: Option<&str>) {
    info!(
        username = username,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log API failures that are deliberately not shown to the user
pub fn log_swallowed_error(operation: &str, error: &str) {
    warn!(
        operation = operation,
        error = error,
        "Operation failed, keeping previous state"
    );
}

/// Log completed client-side exports
pub fn log_export(kind: &str, file_name: &str, bytes: usize) {
    info!(
        kind = kind,
        file_name = file_name,
        bytes = bytes,
        "Export written"
    );
}
