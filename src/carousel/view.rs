//! Observable outputs of a carousel, derived from the current index.
//!
//! Nothing in here is stored on the carousel. Every call recomputes the full
//! view from `(index, structure)`, so the attributes can never drift from the
//! index that produced them.

use serde::Serialize;

use super::Structure;

/// Everything a host applies to the DOM after a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselView {
    pub index: usize,
    pub slide_count: usize,
    /// `transform` of the track, `None` when the track element is missing.
    pub track_transform: Option<String>,
    pub slides: Vec<SlideState>,
    /// Empty when the container has no dot host.
    pub dots: Vec<DotState>,
    pub prev: Option<ControlState>,
    pub next: Option<ControlState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideState {
    pub visible: bool,
}

impl SlideState {
    pub fn aria_hidden(&self) -> &'static str {
        if self.visible { "false" } else { "true" }
    }

    /// `0` keeps the slide in the tab order, `-1` removes it.
    pub fn tab_index(&self) -> i32 {
        if self.visible { 0 } else { -1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DotState {
    pub active: bool,
}

impl DotState {
    pub fn aria_current(&self) -> &'static str {
        if self.active { "true" } else { "false" }
    }

    pub fn class(&self) -> &'static str {
        if self.active {
            "carousel__dot is-active"
        } else {
            "carousel__dot"
        }
    }
}

/// Accessible label of the dot at `index`.
pub fn dot_label(index: usize) -> String {
    format!("Show slide {}", index + 1)
}

/// State of a previous/next button. Disabled is mirrored three ways
/// (`disabled`, `is-hidden` class, `aria-disabled`) and they always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub enabled: bool,
}

impl ControlState {
    pub fn disabled(&self) -> bool {
        !self.enabled
    }

    pub fn hidden(&self) -> bool {
        !self.enabled
    }

    pub fn aria_disabled(&self) -> &'static str {
        if self.enabled { "false" } else { "true" }
    }
}

pub fn track_transform(index: usize) -> String {
    format!("translateX(-{}%)", index * 100)
}

pub fn has_prev(index: usize) -> bool {
    index > 0
}

pub fn has_next(index: usize, slide_count: usize) -> bool {
    index + 1 < slide_count
}

pub(super) fn derive(index: usize, structure: &Structure) -> CarouselView {
    let dots = if structure.dots {
        (0..structure.slide_count)
            .map(|i| DotState { active: i == index })
            .collect()
    } else {
        Vec::new()
    };
    CarouselView {
        index,
        slide_count: structure.slide_count,
        track_transform: structure.track.then(|| track_transform(index)),
        slides: (0..structure.slide_count)
            .map(|i| SlideState { visible: i == index })
            .collect(),
        dots,
        prev: structure.prev.then(|| ControlState {
            enabled: has_prev(index),
        }),
        next: structure.next.then(|| ControlState {
            enabled: has_next(index, structure.slide_count),
        }),
    }
}
