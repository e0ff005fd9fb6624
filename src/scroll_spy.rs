//! Scroll spy: highlight the nav link of the section currently in view.
//!
//! Intersection is computed the way an `IntersectionObserver` with a shrunk
//! root would report it: the viewport minus `top_margin` and `bottom_margin`
//! (fractions of its height) forms the observation window, and a section
//! intersects when at least `threshold` of its own height lies inside it.
//! When several sections qualify, the last one in document order wins.
//!
//! Near the bottom of the page the last section may be too short to ever
//! reach the window, so scrolling within `bottom_tolerance_px` of the end
//! activates it directly.

use serde::Serialize;

use crate::config::ScrollSpyConfig;
use crate::document::{NavLinkMarkup, SectionMarkup};

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    link_targets: Vec<String>,
    sections: Vec<SectionMarkup>,
    config: ScrollSpyConfig,
    viewport_height: f64,
    page_height: f64,
    active: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkState {
    pub target: String,
    pub active: bool,
}

/// Section id a nav link points at: `#work` → `work`, anything else as is.
pub fn link_target(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}

impl ScrollSpy {
    pub fn new(
        links: &[NavLinkMarkup],
        sections: &[SectionMarkup],
        config: ScrollSpyConfig,
        viewport_height: f64,
        page_height: f64,
    ) -> Self {
        Self {
            link_targets: links
                .iter()
                .map(|l| link_target(&l.href).to_string())
                .collect(),
            sections: sections.to_vec(),
            config,
            viewport_height,
            page_height,
            active: None,
        }
    }

    fn is_wired(&self) -> bool {
        !self.link_targets.is_empty() && !self.sections.is_empty()
    }

    /// Id of the section whose link is currently highlighted.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Fraction of `section` inside the observation window at `scroll_y`.
    pub fn visible_ratio(&self, section: &SectionMarkup, scroll_y: f64) -> f64 {
        if section.height <= 0.0 {
            return 0.0;
        }
        let window_top = scroll_y + self.config.top_margin * self.viewport_height;
        let window_bottom = scroll_y + self.viewport_height * (1.0 - self.config.bottom_margin);
        let overlap =
            (section.top + section.height).min(window_bottom) - section.top.max(window_top);
        (overlap.max(0.0) / section.height).min(1.0)
    }

    /// Mark a section as intersecting, as an observer callback would.
    pub fn report_intersection(&mut self, section_id: &str) {
        if !self.is_wired() {
            return;
        }
        self.active = Some(section_id.to_string());
    }

    /// Recompute after the page scrolled to `scroll_y`.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if !self.is_wired() {
            return;
        }
        let intersecting = self
            .sections
            .iter()
            .rev()
            .find(|s| {
                let ratio = self.visible_ratio(s, scroll_y);
                ratio > 0.0 && ratio >= self.config.threshold
            })
            .map(|s| s.id.clone());
        if let Some(id) = intersecting {
            self.active = Some(id);
        }

        if self.viewport_height + scroll_y >= self.page_height - self.config.bottom_tolerance_px {
            if let Some(last) = self.sections.last() {
                self.active = Some(last.id.clone());
            }
        }
    }

    /// `is-active` state of every nav link, in link order.
    pub fn links(&self) -> Vec<LinkState> {
        self.link_targets
            .iter()
            .map(|target| LinkState {
                target: target.clone(),
                active: self.active.as_deref() == Some(target.as_str()),
            })
            .collect()
    }
}
