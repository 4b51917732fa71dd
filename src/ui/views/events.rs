//! Console rendering of fleet events
//!
//! `render_event` is a pure function of the event and the UI context;
//! `ConsoleEventSink` only decides where the lines go.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use fleetup::domain::ports::{FleetEvent, FleetEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_wait(d: Duration) -> String {
    if d.subsec_millis() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// One console line for `event`, or `None` when it is not shown at this verbosity
pub fn render_event(event: &FleetEvent, ui: &UiContext) -> Option<String> {
    let (c, u) = (ui.color, ui.unicode);
    let icon = |i: Icon| i.colored(c, u);

    let line = match event {
        FleetEvent::ReadinessStarted {
            endpoint,
            max_attempts,
        } => format!(
            "{} Waiting for {} (up to {} attempts)",
            icon(Icon::Progress),
            endpoint,
            max_attempts
        ),

        FleetEvent::ReadinessAttempt {
            attempt,
            max_attempts,
            status,
            retry_in,
        } => {
            let seen = match status {
                Some(code) => format!("HTTP {}", code),
                None => "no response".to_string(),
            };
            let tail = if retry_in.is_zero() {
                String::new()
            } else {
                format!(", retrying in {}", format_wait(*retry_in))
            };
            format!(
                "{} Attempt {}/{}: not ready ({}){}",
                icon(Icon::Pending),
                attempt,
                max_attempts,
                ColoredText::dim(seen).render(c),
                tail
            )
        }

        FleetEvent::Ready { attempt, status } => format!(
            "{} Management endpoint ready (HTTP {}, attempt {})",
            icon(Icon::Success),
            status,
            attempt
        ),

        FleetEvent::ReadinessExhausted { attempts } => format!(
            "{} Management endpoint not ready after {} attempts",
            icon(Icon::Error),
            attempts
        ),

        FleetEvent::Authenticated { username } => {
            format!("{} Logged in as {}", icon(Icon::Success), username)
        }

        FleetEvent::Registered { group, subgroup } => format!(
            "{} Monitoring domain {}/{} registered",
            icon(Icon::Success),
            group,
            subgroup
        ),

        FleetEvent::RegistrationFailed {
            group,
            subgroup,
            error,
        } => format!(
            "{} Monitoring domain {}/{} not registered: {}",
            icon(Icon::Warning),
            group,
            subgroup,
            ColoredText::warning(error.as_str()).render(c)
        ),

        FleetEvent::PushStarted { address, role } => {
            if ui.verbose == 0 {
                return None;
            }
            format!(
                "{} {} {}: pushing configuration",
                icon(Icon::Pending),
                role,
                address
            )
        }

        FleetEvent::PushSucceeded { address, role } => {
            format!("{} {} {}: configured", icon(Icon::Success), role, address)
        }

        FleetEvent::PushFailed {
            address,
            role,
            error,
        } => format!(
            "{} {} {}: {}",
            icon(Icon::Error),
            role,
            address,
            ColoredText::error(error.as_str()).render(c)
        ),

        FleetEvent::FleetConfigured { succeeded, failed } => {
            let i = if *failed == 0 {
                Icon::Success
            } else {
                Icon::Warning
            };
            format!(
                "{} Configured {}/{} hosts",
                icon(i),
                succeeded,
                succeeded + failed
            )
        }

        FleetEvent::VerificationStarted { total } => format!(
            "{} Verifying {} endpoint{}",
            icon(Icon::Progress),
            total,
            if *total == 1 { "" } else { "s" }
        ),

        FleetEvent::ProbeCompleted {
            description,
            address,
            reachable,
        } => {
            if *reachable {
                format!("{} {} {}", icon(Icon::Success), description, address)
            } else {
                format!(
                    "{} {} {} {}",
                    icon(Icon::Error),
                    description,
                    address,
                    ColoredText::error("unreachable").render(c)
                )
            }
        }

        // The closing summary carries the totals.
        FleetEvent::VerificationCompleted { .. } => return None,

        FleetEvent::ProvisionStepStarted {
            index,
            total,
            name,
            command,
        } => format!(
            "\n{} {}/{}: {} {}",
            icon(Icon::Progress),
            index,
            total,
            ColoredText::warning(name.as_str()).bold().render(c),
            ColoredText::dim(format!("(running '{}')", command)).render(c)
        ),

        FleetEvent::ProvisionStepFailed { name, error } => format!(
            "{} {} failed: {}",
            icon(Icon::Error),
            name,
            ColoredText::error(error.as_str()).render(c)
        ),

        FleetEvent::Cancelled { phase } => {
            format!("{} Cancelled during {}", icon(Icon::Warning), phase)
        }
    };

    Some(line)
}

/// Human-readable progress, one line per event
pub struct ConsoleEventSink {
    ui: UiContext,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl FleetEventSink for ConsoleEventSink {
    fn on_event(&self, event: FleetEvent) {
        let Some(line) = render_event(&event, &self.ui) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::terminal::TerminalCapabilities;
    use fleetup::domain::entities::Role;
    use std::sync::Arc;

    fn plain(verbose: u8) -> UiContext {
        UiContext {
            json: false,
            verbose,
            caps: TerminalCapabilities {
                is_tty: false,
                supports_color: false,
                supports_unicode: false,
                is_ci: false,
                width: 80,
            },
            color: false,
            unicode: false,
        }
    }

    #[test]
    fn attempt_line_shows_status_and_wait() {
        let line = render_event(
            &FleetEvent::ReadinessAttempt {
                attempt: 2,
                max_attempts: 60,
                status: Some(503),
                retry_in: Duration::from_secs(10),
            },
            &plain(0),
        )
        .unwrap();
        assert_eq!(line, "[ ] Attempt 2/60: not ready (HTTP 503), retrying in 10s");
    }

    #[test]
    fn last_attempt_has_no_retry_hint() {
        let line = render_event(
            &FleetEvent::ReadinessAttempt {
                attempt: 60,
                max_attempts: 60,
                status: None,
                retry_in: Duration::ZERO,
            },
            &plain(0),
        )
        .unwrap();
        assert_eq!(line, "[ ] Attempt 60/60: not ready (no response)");
    }

    #[test]
    fn push_started_only_when_verbose() {
        let event = FleetEvent::PushStarted {
            address: "10.0.1.5".to_string(),
            role: Role::Production,
        };
        assert!(render_event(&event, &plain(0)).is_none());
        assert_eq!(
            render_event(&event, &plain(1)).unwrap(),
            "[ ] production 10.0.1.5: pushing configuration"
        );
    }

    #[test]
    fn push_failure_names_host_and_reason() {
        let line = render_event(
            &FleetEvent::PushFailed {
                address: "10.0.1.5".to_string(),
                role: Role::Production,
                error: "ssh connection failed: timed out".to_string(),
            },
            &plain(0),
        )
        .unwrap();
        assert_eq!(
            line,
            "[FAIL] production 10.0.1.5: ssh connection failed: timed out"
        );
    }

    #[test]
    fn fractional_waits_keep_one_decimal() {
        assert_eq!(format_wait(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_wait(Duration::from_secs(10)), "10s");
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_writes_one_line_per_visible_event() {
        let buffer = Buffer::default();
        let sink = ConsoleEventSink::with_writer(plain(0), buffer.clone());

        sink.on_event(FleetEvent::Authenticated {
            username: "admin".to_string(),
        });
        sink.on_event(FleetEvent::VerificationCompleted {
            reachable: 1,
            total: 1,
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "[OK] Logged in as admin\n");
    }
}
