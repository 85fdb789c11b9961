//! Persistent key-value storage
//!
//! This module keeps the client's persisted string entries (language
//! preference, session token, username) in a JSON file, the terminal
//! counterpart of browser-local storage. Entries never expire.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::utils::errors::Result;

/// File-backed string key-value store
#[derive(Debug, Clone)]
pub struct StateStorage {
    /// Cached entries, authoritative for reads
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    /// Backing file; `None` keeps everything in memory
    path: Option<PathBuf>,
}

impl StateStorage {
    /// Open the store at `path`, starting empty when the file does not exist
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "Storage file is unreadable, starting empty"
                        );
                        BTreeMap::new()
                    }
                }
            }
        } else {
            debug!(path = %path.display(), "Storage file not found, starting empty");
            BTreeMap::new()
        };

        info!(path = %path.display(), entries = entries.len(), "Opened client storage");

        Ok(Self {
            entries: Arc::new(Mutex::new(entries)),
            path: Some(path),
        })
    }

    /// Create a store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            path: None,
        }
    }

    /// Read an entry
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Write a single entry
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)]).await
    }

    /// Write several entries with a single flush
    pub async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut entries = self.entries.lock().await;
        for (key, value) in pairs {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        debug!(keys = ?pairs.iter().map(|(k, _)| *k).collect::<Vec<_>>(), "Storage entries set");
        self.flush(&entries).await
    }

    /// Remove a single entry
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key]).await
    }

    /// Remove several entries with a single flush
    pub async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let mut removed = 0;
        for key in keys {
            if entries.remove(*key).is_some() {
                removed += 1;
            }
        }
        debug!(keys = ?keys, removed = removed, "Storage entries removed");
        if removed == 0 {
            return Ok(());
        }
        self.flush(&entries).await
    }

    /// Check if an entry exists
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    /// Backing file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persist the entries through a temporary file and rename
    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized).await?;
        fs::rename(&tmp_path, path).await?;

        debug!(path = %path.display(), entries = entries.len(), "Storage flushed");
        Ok(())
    }
}
