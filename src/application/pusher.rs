//! Remote configuration push
//!
//! Installs the registration document on one host and restarts its agent.
//! Every failure is folded into the returned `PushOutcome`; nothing here
//! may abort the rest of the fleet.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{PushOutcome, RegistrationRecord, Target, DEFAULT_CONFIG_PATH};
use crate::domain::ports::{FleetEvent, FleetEventSink, RemoteShell};
use crate::error::{FleetError, FleetResult};

/// Exit status ssh uses for its own (connection/auth) failures
const SSH_TRANSPORT_FAILURE: i32 = 255;

pub const DEFAULT_AGENT_SERVICE: &str = "uctv-agent";

/// Where the document goes and which service to bounce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOptions {
    pub config_path: String,
    pub agent_service: String,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            agent_service: DEFAULT_AGENT_SERVICE.to_string(),
        }
    }
}

/// Quote a string for safe use in a POSIX shell command
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Elevated all-or-nothing install of stdin into `path`.
///
/// Writes a sibling temp file and renames it over the destination, so the
/// agent never sees a partial document.
pub fn install_command(path: &str) -> String {
    let dest = shell_quote(path);
    let tmp = shell_quote(&format!("{}.tmp", path));
    let script = format!(
        "cat > {tmp} && mv -f {tmp} {dest} || {{ rm -f {tmp}; exit 1; }}",
        tmp = tmp,
        dest = dest
    );
    format!("sudo sh -c {}", shell_quote(&script))
}

/// Best-effort agent restart; a missing unit is not an error
pub fn restart_command(service: &str) -> String {
    format!("sudo systemctl restart {} || true", shell_quote(service))
}

pub struct RemoteConfigPusher<'a, S: RemoteShell + ?Sized> {
    shell: &'a S,
    events: Arc<dyn FleetEventSink>,
    options: PushOptions,
}

impl<'a, S: RemoteShell + ?Sized> RemoteConfigPusher<'a, S> {
    pub fn new(shell: &'a S, events: Arc<dyn FleetEventSink>, options: PushOptions) -> Self {
        Self {
            shell,
            events,
            options,
        }
    }

    pub fn push_config(&self, target: &Target, record: &RegistrationRecord) -> PushOutcome {
        let detailed = self.events.wants_detailed_events();
        if detailed {
            self.events.on_event(FleetEvent::PushStarted {
                address: target.address().to_string(),
                role: target.role(),
            });
        }

        match self.try_push(target, record) {
            Ok(()) => {
                if detailed {
                    self.events.on_event(FleetEvent::PushSucceeded {
                        address: target.address().to_string(),
                        role: target.role(),
                    });
                }
                PushOutcome::success(target.clone())
            }
            Err(err) => {
                let message = match &err {
                    FleetError::RemoteConfig { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                self.events.on_event(FleetEvent::PushFailed {
                    address: target.address().to_string(),
                    role: target.role(),
                    error: message.clone(),
                });
                PushOutcome::failure(target.clone(), message)
            }
        }
    }

    fn try_push(&self, target: &Target, record: &RegistrationRecord) -> FleetResult<()> {
        let document = record.render();
        let install = install_command(&self.options.config_path);

        let output = self
            .shell
            .run(target, &install, Some(&document))
            .map_err(|e| remote_failure(target, e.to_string()))?;
        if !output.success() {
            let message = if output.status == Some(SSH_TRANSPORT_FAILURE) {
                format!("ssh connection failed: {}", output.describe_failure())
            } else {
                format!(
                    "writing {} failed: {}",
                    self.options.config_path,
                    output.describe_failure()
                )
            };
            return Err(remote_failure(target, message));
        }
        debug!(address = target.address(), path = %self.options.config_path, "configuration installed");

        let restart = restart_command(&self.options.agent_service);
        let output = self
            .shell
            .run(target, &restart, None)
            .map_err(|e| remote_failure(target, e.to_string()))?;
        if !output.success() {
            return Err(remote_failure(
                target,
                format!("agent restart could not be issued: {}", output.describe_failure()),
            ));
        }
        debug!(address = target.address(), service = %self.options.agent_service, "agent restart issued");
        Ok(())
    }
}

fn remote_failure(target: &Target, message: String) -> FleetError {
    FleetError::RemoteConfig {
        address: target.address().to_string(),
        message,
    }
}
