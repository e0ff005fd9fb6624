//! Responsive navigation toggle.
//!
//! The toggle button, the link panel and the page body carry three
//! redundant signals of the same boolean (`aria-expanded`, `is-open`,
//! `is-nav-open`); they are derived from one field and can't disagree.

use serde::Serialize;
use tracing::debug;

use crate::document::NavMarkup;

#[derive(Debug, Clone)]
pub struct NavToggle {
    /// Toggle and panel both exist; otherwise every operation is a no-op.
    wired: bool,
    open: bool,
    link_count: usize,
}

/// Attributes the host applies after any nav operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub aria_expanded: bool,
    pub panel_open: bool,
    pub body_nav_open: bool,
}

impl NavToggle {
    pub fn from_markup(markup: &NavMarkup) -> Self {
        Self {
            wired: markup.toggle && markup.panel,
            open: false,
            link_count: markup.links.len(),
        }
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        if !self.wired {
            return;
        }
        self.open = !self.open;
        debug!(open = self.open, "nav toggled");
    }

    pub fn close(&mut self) {
        if !self.wired {
            return;
        }
        self.open = false;
    }

    /// Any key handler on the document: only `Escape` closes the panel.
    pub fn key_down(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    /// Following an in-page link closes the panel.
    pub fn link_clicked(&mut self, index: usize) {
        if index < self.link_count {
            self.close();
        }
    }

    pub fn state(&self) -> NavState {
        NavState {
            aria_expanded: self.open,
            panel_open: self.open,
            body_nav_open: self.open,
        }
    }
}
