//! Wall-clock helpers for the countdown and phase timers.
//!
//! Everything takes `now` explicitly instead of reading the system clock, so
//! the front-end loop decides when time advances and tests can step through
//! seconds with plain `Instant` arithmetic.

use std::time::{Duration, Instant};

/// A repeating deadline.
///
/// `poll` reports how many whole periods have elapsed since the last call,
/// so a slow frame never swallows a countdown second: two overdue ticks are
/// reported as two.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    /// First tick fires one `period` after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: start + period,
        }
    }

    /// Number of ticks due at `now`. Advances the deadline past `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next_due {
            ticks += 1;
            self.next_due += self.period;
        }
        ticks
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Whole seconds between `start` and `now`, zero if `now` is earlier.
pub fn whole_seconds_between(start: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(start).as_secs()
}
