//! Fixed-interval retry policy for readiness polling
//!
//! Readiness targets a bounded, known startup window, so there is no
//! exponential backoff: `max_attempts` tries, `interval` apart, optionally
//! capped by an absolute deadline.

use std::time::{Duration, Instant};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub deadline: Option<Instant>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
            deadline: None,
        }
    }

    /// Stop retrying once `budget` has elapsed from now. A budget past the
    /// end of the clock means no deadline.
    pub fn with_deadline_in(mut self, budget: Duration) -> Self {
        self.deadline = Instant::now().checked_add(budget);
        self
    }

    pub fn deadline_passed(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// How long to wait before the next attempt, clipped to the deadline
    pub fn wait_before_next(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(d) => self.interval.min(d.saturating_duration_since(now)),
            None => self.interval,
        }
    }
}
