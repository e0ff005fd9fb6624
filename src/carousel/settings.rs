//! Carousel configuration read from the container's data attributes.

use std::time::Duration;

/// Autoplay period used when `data-interval` is missing or unusable.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(7000);

/// Immutable per-instance settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    pub autoplay: bool,
    pub interval: Duration,
    /// Sampled once from the platform; never re-evaluated.
    pub reduced_motion: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            autoplay: false,
            interval: DEFAULT_INTERVAL,
            reduced_motion: false,
        }
    }
}

impl CarouselSettings {
    /// Build settings from the raw `data-autoplay` / `data-interval` strings.
    pub fn from_attributes(
        autoplay: Option<&str>,
        interval: Option<&str>,
        reduced_motion: bool,
    ) -> Self {
        Self {
            autoplay: parse_autoplay(autoplay),
            interval: parse_interval(interval),
            reduced_motion,
        }
    }

    /// Whether the timer may ever run for this instance.
    pub fn autoplay_allowed(&self) -> bool {
        self.autoplay && !self.reduced_motion
    }
}

/// Only the exact string `"true"` enables autoplay.
pub fn parse_autoplay(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// Parse a positive integer millisecond count, falling back to
/// [`DEFAULT_INTERVAL`] for anything else (empty, non-numeric, zero, negative).
pub fn parse_interval(raw: Option<&str>) -> Duration {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_INTERVAL)
}
