//! Copy-to-clipboard buttons (`.topbar__copy`).
//!
//! Clicking a button copies its `data-copy` value with whitespace runs
//! collapsed, then flags that button (and only that one) as copied for a
//! short while. If the primary clipboard API fails the fallback path is
//! tried; the button is flagged either way, matching what the user sees in a
//! browser where the fallback can fail silently.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::document::CopyButtonMarkup;
use crate::timer::{Millis, Timeout};
use std::time::Duration;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,
    #[error("copy rejected: {0}")]
    Rejected(String),
}

pub trait Clipboard {
    /// Async clipboard API.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    /// Hidden-textarea + copy command path.
    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard with switchable failures.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub primary_available: bool,
    pub fallback_available: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: None,
            primary_available: true,
            fallback_available: true,
        }
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.primary_available {
            return Err(ClipboardError::Unavailable);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.fallback_available {
            return Err(ClipboardError::Rejected("copy command not supported".into()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone)]
pub struct CopyButtons {
    buttons: Vec<CopyButtonMarkup>,
    feedback: Duration,
    copied: Option<(usize, Timeout)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyButtonState {
    pub id: String,
    pub copied: bool,
}

impl CopyButtons {
    pub fn new(buttons: &[CopyButtonMarkup], feedback: Duration) -> Self {
        Self {
            buttons: buttons.to_vec(),
            feedback,
            copied: None,
        }
    }

    /// Copy the value of button `id`. Returns the copied text, `None` when
    /// the button is unknown or its `data-copy` is empty. A whitespace-only
    /// value is not empty: it copies as `""` and still flags the button.
    pub fn click(
        &mut self,
        id: &str,
        now: Millis,
        clipboard: &mut dyn Clipboard,
    ) -> Option<String> {
        let index = self.buttons.iter().position(|b| b.id == id)?;
        let raw = &self.buttons[index].copy;
        if raw.is_empty() {
            return None;
        }
        let text = normalize(raw);
        if clipboard.write_text(&text).is_err() {
            if let Err(err) = clipboard.fallback_copy(&text) {
                warn!(%err, button = id, "copy not supported");
            }
        }
        self.copied = Some((index, Timeout::after(self.feedback, now)));
        Some(text)
    }

    /// Clear the copied flag once its feedback period is over.
    pub fn tick(&mut self, now: Millis) {
        if self.copied.is_some_and(|(_, timeout)| timeout.is_due(now)) {
            self.copied = None;
        }
    }

    pub fn state(&self) -> Vec<CopyButtonState> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, b)| CopyButtonState {
                id: b.id.clone(),
                copied: self.copied.is_some_and(|(index, _)| index == i),
            })
            .collect()
    }
}
