//! JSON Event Sink
//!
//! Outputs fleet events as NDJSON for CI/automation consumption.

use crate::domain::ports::{FleetEvent, FleetEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Worker threads emit concurrently; one line per lock
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }

    fn to_json(&self, event: FleetEvent) -> serde_json::Value {
        let command = self.command;
        match event {
            FleetEvent::ReadinessStarted {
                endpoint,
                max_attempts,
            } => serde_json::json!({
                "event": "readiness_start",
                "command": command,
                "endpoint": endpoint,
                "max_attempts": max_attempts,
            }),

            FleetEvent::ReadinessAttempt {
                attempt,
                max_attempts,
                status,
                retry_in,
            } => serde_json::json!({
                "event": "readiness_attempt",
                "command": command,
                "attempt": attempt,
                "max_attempts": max_attempts,
                "status": status,
                "retry_in_secs": retry_in.as_secs_f64(),
            }),

            FleetEvent::Ready { attempt, status } => serde_json::json!({
                "event": "ready",
                "command": command,
                "attempt": attempt,
                "status": status,
            }),

            FleetEvent::ReadinessExhausted { attempts } => serde_json::json!({
                "event": "readiness_timeout",
                "command": command,
                "attempts": attempts,
            }),

            FleetEvent::Authenticated { username } => serde_json::json!({
                "event": "authenticated",
                "command": command,
                "username": username,
            }),

            FleetEvent::Registered { group, subgroup } => serde_json::json!({
                "event": "registered",
                "command": command,
                "group": group,
                "subgroup": subgroup,
            }),

            FleetEvent::RegistrationFailed {
                group,
                subgroup,
                error,
            } => serde_json::json!({
                "event": "registration_failed",
                "command": command,
                "group": group,
                "subgroup": subgroup,
                "error": error,
            }),

            FleetEvent::PushStarted { address, role } => serde_json::json!({
                "event": "item_start",
                "command": command,
                "address": address,
                "role": role.as_str(),
            }),

            FleetEvent::PushSucceeded { address, role } => serde_json::json!({
                "event": "item_written",
                "command": command,
                "address": address,
                "role": role.as_str(),
            }),

            FleetEvent::PushFailed {
                address,
                role,
                error,
            } => serde_json::json!({
                "event": "item_error",
                "command": command,
                "address": address,
                "role": role.as_str(),
                "error": error,
            }),

            FleetEvent::FleetConfigured { succeeded, failed } => {
                let status = if failed == 0 { "success" } else { "partial" };
                serde_json::json!({
                    "event": "configured",
                    "command": command,
                    "status": status,
                    "succeeded": succeeded,
                    "failed": failed,
                })
            }

            FleetEvent::VerificationStarted { total } => serde_json::json!({
                "event": "verify_start",
                "command": command,
                "total": total,
            }),

            FleetEvent::ProbeCompleted {
                description,
                address,
                reachable,
            } => serde_json::json!({
                "event": "probe",
                "command": command,
                "description": description,
                "address": address,
                "reachable": reachable,
            }),

            FleetEvent::VerificationCompleted { reachable, total } => {
                let status = if reachable == total {
                    "success"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "verified",
                    "command": command,
                    "status": status,
                    "reachable": reachable,
                    "total": total,
                })
            }

            FleetEvent::ProvisionStepStarted {
                index,
                total,
                name,
                command: step_command,
            } => serde_json::json!({
                "event": "step_start",
                "command": command,
                "index": index,
                "total": total,
                "name": name,
                "step_command": step_command,
            }),

            FleetEvent::ProvisionStepFailed { name, error } => serde_json::json!({
                "event": "step_error",
                "command": command,
                "name": name,
                "error": error,
            }),

            FleetEvent::Cancelled { phase } => serde_json::json!({
                "event": "cancelled",
                "command": command,
                "phase": phase,
            }),
        }
    }
}

impl FleetEventSink for JsonEventSink {
    fn on_event(&self, event: FleetEvent) {
        let json = self.to_json(event);
        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
