use crate::core::clipboard::ClipboardSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use console::Term;
use tokio::sync::Mutex;
use tracing::debug;

/// Copies through the terminal with an OSC 52 escape sequence, which most
/// terminal emulators (and tmux with `set-clipboard on`) forward to the
/// system clipboard.
pub struct TerminalClipboard {
    term: Term,
}

impl TerminalClipboard {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn escape_sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

impl Default for TerminalClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardSink for TerminalClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if !self.term.is_term() {
            anyhow::bail!("stdout is not a terminal");
        }
        debug!("Writing OSC 52 clipboard sequence");
        self.term
            .write_str(&Self::escape_sequence(text))
            .context("Failed to write clipboard sequence")?;
        self.term.flush().context("Failed to flush terminal")
    }
}

/// Keeps copied text in memory. Used when no terminal is attached.
#[derive(Default)]
pub struct MemoryClipboard {
    entries: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text.
    pub async fn contents(&self) -> Option<String> {
        self.entries.lock().await.last().cloned()
    }

    pub async fn history(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl ClipboardSink for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        self.entries.lock().await.push(text.to_string());
        Ok(())
    }
}
