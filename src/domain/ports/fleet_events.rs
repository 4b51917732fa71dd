//! Fleet Event Port
//!
//! Provides an observable interface for bring-up runs.
//! Components only emit events; how they are shown (console, NDJSON,
//! nothing) is decided by the sink.

use std::time::Duration;

use crate::domain::entities::Role;

/// Event emitted during a bring-up run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetEvent {
    /// Readiness polling started
    ReadinessStarted { endpoint: String, max_attempts: u32 },

    /// One attempt did not find the endpoint ready
    ReadinessAttempt {
        attempt: u32,
        max_attempts: u32,
        /// HTTP status if the endpoint answered at all
        status: Option<u16>,
        retry_in: Duration,
    },

    /// Endpoint answered with an accepted status
    Ready { attempt: u32, status: u16 },

    /// Retry policy ran out
    ReadinessExhausted { attempts: u32 },

    /// Login succeeded
    Authenticated { username: String },

    /// Monitoring domain registered (or already present)
    Registered { group: String, subgroup: String },

    /// Monitoring domain registration failed
    RegistrationFailed {
        group: String,
        subgroup: String,
        error: String,
    },

    /// Push to one host started
    PushStarted { address: String, role: Role },

    /// Configuration written and agent restart issued
    PushSucceeded { address: String, role: Role },

    /// Push to one host failed
    PushFailed {
        address: String,
        role: Role,
        error: String,
    },

    /// All pushes finished
    FleetConfigured { succeeded: usize, failed: usize },

    /// Verification sweep started
    VerificationStarted { total: usize },

    /// One endpoint probed
    ProbeCompleted {
        description: String,
        address: String,
        reachable: bool,
    },

    /// Verification sweep finished
    VerificationCompleted { reachable: usize, total: usize },

    /// External provisioning step started (`index` is 1-based)
    ProvisionStepStarted {
        index: usize,
        total: usize,
        name: String,
        command: String,
    },

    /// External provisioning step failed
    ProvisionStepFailed { name: String, error: String },

    /// Operator aborted the run
    Cancelled { phase: String },
}

/// Trait for receiving fleet events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
///
/// Events may arrive from worker threads during fan-out phases.
pub trait FleetEventSink: Send + Sync {
    /// Handle a fleet event
    fn on_event(&self, event: FleetEvent);

    /// Check if this sink wants per-attempt and per-host events
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl FleetEventSink for NoopEventSink {
    fn on_event(&self, _event: FleetEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
