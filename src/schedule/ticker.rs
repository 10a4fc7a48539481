//! Fixed-interval deadline tracking.

use std::time::Duration;

/// Accumulates elapsed time against the engine's current interval.
///
/// Disarming discards the accumulated time, so a timer that comes back
/// (resume, restart, AI turn) always waits a full interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ticker {
    elapsed: Duration,
    armed: bool,
}

impl Ticker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Time accumulated toward the next deadline.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Arm or disarm from the engine's `timer_interval()`.
    pub fn sync(&mut self, interval: Option<Duration>) {
        match interval {
            Some(_) => self.armed = true,
            None => {
                self.armed = false;
                self.elapsed = Duration::ZERO;
            }
        }
    }

    /// Add elapsed time. Ignored while disarmed.
    pub fn accumulate(&mut self, dt: Duration) {
        if self.armed {
            self.elapsed += dt;
        }
    }

    /// Consume one `interval` if it has fully elapsed.
    pub fn take_due(&mut self, interval: Duration) -> bool {
        if !self.armed || interval.is_zero() || self.elapsed < interval {
            return false;
        }
        self.elapsed -= interval;
        true
    }
}
