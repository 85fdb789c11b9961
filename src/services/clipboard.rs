//! Clipboard side effect
//!
//! Copying is fire-and-forget: once written there is nothing to roll back.
//! The terminal implementation uses the OSC 52 escape sequence, which most
//! terminal emulators (and tmux with `set-clipboard on`) forward to the
//! system clipboard.

use std::io::Write;
use std::sync::{Arc, Mutex};
use base64::Engine;
use tracing::debug;
use crate::utils::errors::{RegistryError, Result};

/// Destination for copied text
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Writes OSC 52 sequences to stderr
#[derive(Debug, Clone, Default)]
pub struct TerminalClipboard;

impl TerminalClipboard {
    /// Escape sequence that sets the clipboard to `text`
    pub fn osc52(text: &str) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        format!("\x1b]52;c;{}\x07", encoded)
    }
}

impl Clipboard for TerminalClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(Self::osc52(text).as_bytes())?;
        stderr.flush()?;
        debug!(length = text.len(), "Copied text to terminal clipboard");
        Ok(())
    }
}

/// Keeps copied text in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| RegistryError::Export("clipboard lock poisoned".to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
