//! Deadline-based timers for a single-threaded, event-driven host.
//!
//! Nothing here sleeps or spawns. A timer is a plain value holding its next
//! deadline; the owner polls it with the current time whenever the host
//! delivers an event or advances the clock. Cancelling a timer is dropping
//! (or `take()`-ing) the handle, so a component that is torn down cannot leave
//! a running timer behind.

use std::time::Duration;

/// Milliseconds since an arbitrary host epoch (page load, test start...).
pub type Millis = u64;

/// Convert a [`Duration`] to whole milliseconds, saturating.
pub fn as_millis(duration: Duration) -> Millis {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A repeating timer: fires every `period` starting one period after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Millis,
    next_due: Millis,
}

impl IntervalTimer {
    /// Schedule a repeating timer. A zero period is bumped to 1ms so the
    /// timer can never fire an unbounded number of times per poll.
    pub fn start(period: Duration, now: Millis) -> Self {
        let period = as_millis(period).max(1);
        Self {
            period,
            next_due: now.saturating_add(period),
        }
    }

    pub fn period(&self) -> Millis {
        self.period
    }

    pub fn next_due(&self) -> Millis {
        self.next_due
    }

    /// Consume one elapsed period, if any.
    ///
    /// Returns `true` when the deadline was reached and advances it by one
    /// period. Callers loop on this so that each elapsed period is observed
    /// separately and can cancel the timer in between.
    pub fn fire_once(&mut self, now: Millis) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = self.next_due.saturating_add(self.period);
        true
    }
}

/// A one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    due: Millis,
}

impl Timeout {
    pub fn after(delay: Duration, now: Millis) -> Self {
        Self {
            due: now.saturating_add(as_millis(delay)),
        }
    }

    pub fn due(&self) -> Millis {
        self.due
    }

    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.due
    }
}
