//! Copy-to-clipboard abstraction and the transient "Copied!" indicator.

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::{Duration, Instant};
use tracing::{debug, error};

pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_LABEL: &str = "[copy]";
pub const DEFAULT_RESET_AFTER: Duration = Duration::from_millis(2000);

#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Idle,
    Copied,
}

/// Shows "Copied!" for `reset_after` following a successful copy.
///
/// Copying again while the indicator is showing does not extend the window.
#[derive(Debug, Clone)]
pub struct CopyIndicator {
    reset_after: Duration,
    copied_at: Option<Instant>,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_AFTER)
    }
}

impl CopyIndicator {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            reset_after,
            copied_at: None,
        }
    }

    /// Copies `text`. Failures are logged and leave the indicator idle.
    pub async fn copy(&mut self, sink: &dyn ClipboardSink, text: &str) -> bool {
        match sink.write_text(text).await {
            Ok(()) => {
                if self.state() == IndicatorState::Idle {
                    self.copied_at = Some(Instant::now());
                }
                debug!(len = text.len(), "Copied text to clipboard");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to copy text");
                false
            }
        }
    }

    pub fn state(&self) -> IndicatorState {
        match self.copied_at {
            Some(at) if at.elapsed() < self.reset_after => IndicatorState::Copied,
            _ => IndicatorState::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.state() {
            IndicatorState::Copied => COPIED_LABEL,
            IndicatorState::Idle => COPY_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        copied: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClipboardSink for RecordingSink {
        async fn write_text(&self, text: &str) -> Result<()> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl ClipboardSink for BrokenSink {
        async fn write_text(&self, _text: &str) -> Result<()> {
            Err(anyhow!("clipboard unavailable"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_indicator_reverts_after_window() {
        let sink = RecordingSink::default();
        let mut indicator = CopyIndicator::default();
        assert_eq!(indicator.label(), COPY_LABEL);

        assert!(indicator.copy(&sink, "NC123456789").await);
        assert_eq!(indicator.label(), COPIED_LABEL);
        assert_eq!(*sink.copied.lock().unwrap(), vec!["NC123456789".to_string()]);

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert_eq!(indicator.state(), IndicatorState::Copied);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert_eq!(indicator.label(), COPY_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_does_not_extend_window() {
        let sink = RecordingSink::default();
        let mut indicator = CopyIndicator::new(Duration::from_millis(500));

        indicator.copy(&sink, "a").await;
        tokio::time::advance(Duration::from_millis(400)).await;
        indicator.copy(&sink, "b").await;
        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert_eq!(sink.copied.lock().unwrap().len(), 2);
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_failed_copy_keeps_indicator_idle() {
        let mut indicator = CopyIndicator::default();
        assert!(!indicator.copy(&BrokenSink, "addr").await);
        assert_eq!(indicator.state(), IndicatorState::Idle);
    }
}
