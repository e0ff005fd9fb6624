//! Carousel controller.
//!
//! One [`Carousel`] is built per `[data-carousel]` container. It owns the
//! current slide index, the autoplay timer and the in-progress swipe, and
//! nothing else: two carousels on the same page share no state.
//!
//! ## Transitions
//!
//! All navigation funnels through [`Carousel::go_to`]. Host listeners only
//! translate DOM events into `(target, user_initiated)` pairs via
//! [`Carousel::handle`]. Each call runs to completion; the observable
//! attributes are recomputed from the index on demand ([`Carousel::view`]),
//! so there is no window where the index and the attributes disagree.
//!
//! ## Autoplay
//!
//! The timer runs only when autoplay is configured, reduced motion is off and
//! there is more than one slide. It advances with non-user transitions and
//! never loops: the first tick that finds the carousel on its last slide
//! cancels the timer and halts autoplay. Hover and hidden-page pauses resume
//! when both conditions clear; a halted carousel only restarts on user
//! navigation.
//!
//! ```text
//!  go_to(target, user) ─┬─ no track ───────────────────────────► Ignored
//!                       ├─ clamp(target) == current != target ─► EdgeHit (stop autoplay if !user)
//!                       └─ current = clamp(target) ────────────► Moved / Unchanged (restart if user)
//! ```

pub mod settings;
pub mod view;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{CarouselMarkup, Platform};
use crate::timer::{IntervalTimer, Millis};
pub use settings::{CarouselSettings, DEFAULT_INTERVAL};
pub use view::CarouselView;

/// Minimum horizontal travel (CSS pixels) for a pointer gesture to count as
/// a swipe. Anything at or below is a tap.
pub const SWIPE_THRESHOLD: f64 = 40.0;

/// Which parts of the container markup are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure {
    pub track: bool,
    pub slide_count: usize,
    pub prev: bool,
    pub next: bool,
    pub dots: bool,
}

impl Structure {
    pub fn from_markup(markup: &CarouselMarkup) -> Self {
        Self {
            track: markup.track,
            slide_count: markup.slides.len(),
            prev: markup.prev,
            next: markup.next,
            dots: markup.dots,
        }
    }
}

/// DOM events a carousel listens to, already scoped to its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselEvent {
    PrevClicked,
    NextClicked,
    DotClicked { index: usize },
    PointerEnter,
    PointerLeave,
    PointerDown { x: f64, pointer_id: i32 },
    PointerUp { x: f64 },
    PointerCancel,
    VisibilityChanged { hidden: bool },
}

/// What a call did to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The index changed.
    Moved { from: usize, to: usize },
    /// The target was the current slide; attributes were reapplied.
    Unchanged,
    /// The request pointed past either end and was clamped to the current slide.
    EdgeHit,
    /// Nothing to do (no track, tap, pause/resume, pointer bookkeeping).
    Ignored,
}

impl Outcome {
    pub fn moved(&self) -> bool {
        matches!(self, Outcome::Moved { .. })
    }
}

#[derive(Debug)]
pub struct Carousel {
    id: String,
    structure: Structure,
    settings: CarouselSettings,
    current: usize,
    timer: Option<IntervalTimer>,
    halted: bool,
    hovered: bool,
    page_hidden: bool,
    gesture_start: Option<f64>,
    captured_pointer: Option<i32>,
}

impl Carousel {
    /// Wire up a carousel: show the first slide and start autoplay if allowed.
    pub fn new(
        id: impl Into<String>,
        structure: Structure,
        settings: CarouselSettings,
        now: Millis,
    ) -> Self {
        let mut carousel = Self {
            id: id.into(),
            structure,
            settings,
            current: 0,
            timer: None,
            halted: false,
            hovered: false,
            page_hidden: false,
            gesture_start: None,
            captured_pointer: None,
        };
        carousel.go_to(0, false, now);
        carousel.start_or_restart(now);
        carousel
    }

    pub fn from_markup(markup: &CarouselMarkup, platform: &Platform, now: Millis) -> Self {
        let settings = CarouselSettings::from_attributes(
            markup.autoplay.as_deref(),
            markup.interval.as_deref(),
            platform.prefers_reduced_motion,
        );
        Self::new(&markup.id, Structure::from_markup(markup), settings, now)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.structure.slide_count
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// Whether the autoplay timer is currently scheduled.
    pub fn autoplay_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether autoplay reached the last slide and stopped for good.
    pub fn autoplay_halted(&self) -> bool {
        self.halted
    }

    pub fn next_autoplay_due(&self) -> Option<Millis> {
        self.timer.as_ref().map(IntervalTimer::next_due)
    }

    /// Pointer captured by an in-progress gesture.
    pub fn captured_pointer(&self) -> Option<i32> {
        self.captured_pointer
    }

    pub fn gesture_in_progress(&self) -> bool {
        self.gesture_start.is_some()
    }

    pub fn view(&self) -> CarouselView {
        view::derive(self.current, &self.structure)
    }

    fn last_index(&self) -> usize {
        self.structure.slide_count.saturating_sub(1)
    }

    /// The single state transition.
    pub fn go_to(&mut self, target: usize, user_initiated: bool, now: Millis) -> Outcome {
        if !self.structure.track {
            return Outcome::Ignored;
        }
        let clamped = target.min(self.last_index());
        if clamped == self.current && target != self.current {
            if !user_initiated {
                self.halt_autoplay();
            }
            return Outcome::EdgeHit;
        }

        let from = self.current;
        self.current = clamped;
        if user_initiated {
            self.halted = false;
            self.start_or_restart(now);
        }
        if from == clamped {
            Outcome::Unchanged
        } else {
            debug!(carousel = %self.id, from, to = clamped, user_initiated, "slide changed");
            Outcome::Moved { from, to: clamped }
        }
    }

    pub fn go_next(&mut self, user_initiated: bool, now: Millis) -> Outcome {
        self.go_to(self.current + 1, user_initiated, now)
    }

    /// No-op on the first slide, with no effect on autoplay.
    pub fn go_prev(&mut self, user_initiated: bool, now: Millis) -> Outcome {
        if self.current == 0 {
            return Outcome::Ignored;
        }
        self.go_to(self.current - 1, user_initiated, now)
    }

    /// Cancel any running timer and, if autoplay may run, schedule a fresh one.
    ///
    /// Every start, restart and resume goes through here so that at most one
    /// timer exists per carousel.
    pub fn start_or_restart(&mut self, now: Millis) {
        if !self.settings.autoplay_allowed() {
            return;
        }
        self.timer = None;
        if self.structure.track && self.structure.slide_count > 1 {
            let timer = IntervalTimer::start(self.settings.interval, now);
            debug!(carousel = %self.id, due = timer.next_due(), "autoplay scheduled");
            self.timer = Some(timer);
        }
    }

    /// Cancel the timer if present. Safe to call any number of times.
    pub fn pause(&mut self) {
        if self.timer.take().is_some() {
            debug!(carousel = %self.id, "autoplay paused");
        }
    }

    /// Restart after a hover or hidden-page pause, unless something still
    /// holds the pause or autoplay already ran to the end.
    pub fn resume(&mut self, now: Millis) {
        if self.halted || self.hovered || self.page_hidden {
            return;
        }
        self.start_or_restart(now);
    }

    fn halt_autoplay(&mut self) {
        if self.timer.is_some() {
            debug!(carousel = %self.id, index = self.current, "autoplay reached last slide");
        }
        self.pause();
        self.halted = true;
    }

    /// Run every autoplay step that came due up to `now`. Returns the number
    /// of slides advanced.
    pub fn tick(&mut self, now: Millis) -> usize {
        let mut advanced = 0;
        while let Some(timer) = self.timer.as_mut() {
            if !timer.fire_once(now) {
                break;
            }
            if self.go_next(false, now).moved() {
                advanced += 1;
            }
        }
        advanced
    }

    /// Translate a DOM event into a transition.
    pub fn handle(&mut self, event: CarouselEvent, now: Millis) -> Outcome {
        match event {
            CarouselEvent::PrevClicked => self.go_prev(true, now),
            CarouselEvent::NextClicked => self.go_next(true, now),
            CarouselEvent::DotClicked { index } => {
                if !self.structure.dots {
                    return Outcome::Ignored;
                }
                self.go_to(index, true, now)
            }
            CarouselEvent::PointerEnter => {
                self.hovered = true;
                self.pause();
                Outcome::Ignored
            }
            CarouselEvent::PointerLeave => {
                self.hovered = false;
                self.resume(now);
                Outcome::Ignored
            }
            CarouselEvent::VisibilityChanged { hidden } => {
                self.page_hidden = hidden;
                if hidden {
                    self.pause();
                } else {
                    self.resume(now);
                }
                Outcome::Ignored
            }
            CarouselEvent::PointerDown { x, pointer_id } => {
                if self.structure.track {
                    self.gesture_start = Some(x);
                    self.captured_pointer = Some(pointer_id);
                }
                Outcome::Ignored
            }
            CarouselEvent::PointerUp { x } => {
                self.captured_pointer = None;
                let Some(start) = self.gesture_start.take() else {
                    return Outcome::Ignored;
                };
                let delta = x - start;
                if delta.abs() <= SWIPE_THRESHOLD {
                    return Outcome::Ignored;
                }
                if delta < 0.0 {
                    self.go_next(true, now)
                } else {
                    self.go_prev(true, now)
                }
            }
            CarouselEvent::PointerCancel => {
                self.gesture_start = None;
                self.captured_pointer = None;
                Outcome::Ignored
            }
        }
    }
}
