//! Readiness polling
//!
//! Gates the whole run: nothing talks to the management endpoint until it
//! answers its health resource with an accepted status.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::ports::{FleetEvent, FleetEventSink, ManagementApi};
use crate::domain::value_objects::{CancelToken, RetryPolicy};

/// 200 means healthy, 401 means up but wants a login. Both count as ready.
pub fn is_ready_status(status: u16) -> bool {
    status == 200 || status == 401
}

/// How a polling run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessOutcome {
    Ready { attempt: u32 },
    /// Attempts or deadline ran out; `attempts` is how many were made
    Exhausted { attempts: u32 },
    Cancelled,
}

pub struct ReadinessPoller<'a, A: ManagementApi + ?Sized> {
    api: &'a A,
    events: Arc<dyn FleetEventSink>,
}

impl<'a, A: ManagementApi + ?Sized> ReadinessPoller<'a, A> {
    pub fn new(api: &'a A, events: Arc<dyn FleetEventSink>) -> Self {
        Self { api, events }
    }

    /// Poll until ready, the policy is exhausted, or `cancel` trips.
    /// Returns `false` when giving up.
    pub fn wait_until_ready(&self, policy: &RetryPolicy, cancel: &CancelToken) -> bool {
        matches!(self.poll(policy, cancel), ReadinessOutcome::Ready { .. })
    }

    /// Like `wait_until_ready`, but says how it ended.
    ///
    /// Transport failures and unexpected statuses both just count as a
    /// failed attempt.
    pub fn poll(&self, policy: &RetryPolicy, cancel: &CancelToken) -> ReadinessOutcome {
        let max_attempts = policy.max_attempts.max(1);
        self.events.on_event(FleetEvent::ReadinessStarted {
            endpoint: self.api.endpoint().to_string(),
            max_attempts,
        });

        let mut attempts = 0;
        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return ReadinessOutcome::Cancelled;
            }
            attempts = attempt;

            let status = match self.api.system_status() {
                Ok(status) => Some(status),
                Err(err) => {
                    debug!(attempt, error = %err, "health check got no response");
                    None
                }
            };

            if let Some(status) = status.filter(|s| is_ready_status(*s)) {
                self.events.on_event(FleetEvent::Ready { attempt, status });
                return ReadinessOutcome::Ready { attempt };
            }

            let now = Instant::now();
            let last = attempt == max_attempts || policy.deadline_passed(now);
            let retry_in = if last {
                Duration::ZERO
            } else {
                policy.wait_before_next(now)
            };

            if self.events.wants_detailed_events() {
                self.events.on_event(FleetEvent::ReadinessAttempt {
                    attempt,
                    max_attempts,
                    status,
                    retry_in,
                });
            }

            if last {
                break;
            }
            if !cancel.sleep(retry_in) {
                return ReadinessOutcome::Cancelled;
            }
        }

        self.events
            .on_event(FleetEvent::ReadinessExhausted { attempts });
        ReadinessOutcome::Exhausted { attempts }
    }
}
