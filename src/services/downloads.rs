//! File download side effect
//!
//! The terminal counterpart of a browser download: bytes land in the
//! configured downloads directory under a fixed file name.

use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::errors::Result;
use crate::utils::logging::log_export;

/// Writes exported files into a directory
#[derive(Debug, Clone)]
pub struct Downloads {
    dir: PathBuf,
}

impl Downloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `bytes` as `file_name`, replacing any previous file
    pub async fn save(&self, kind: &str, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).await?;
        log_export(kind, file_name, bytes.len());
        Ok(path)
    }
}
