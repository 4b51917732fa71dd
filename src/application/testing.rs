//! In-memory port implementations for use case tests

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::domain::entities::{Credentials, Target};
use crate::domain::ports::{
    ApiError, CommandOutput, DomainRegistry, ManagementApi, ProbeError, ProvisionStep,
    ReachabilityProbe, RegistrationError, RemoteError, RemoteShell, StepRunner,
};
use crate::domain::value_objects::CancelToken;

pub fn creds() -> Credentials {
    Credentials::new("azureuser", "/keys/lab.pem")
}

/// Management API that replays a script of health statuses
pub struct ScriptedApi {
    statuses: Mutex<VecDeque<Result<u16, ApiError>>>,
    fallback: Result<u16, ApiError>,
    login: Result<Option<String>, ApiError>,
    pub health_calls: AtomicU32,
    pub logins: Mutex<Vec<(String, String)>>,
}

impl ScriptedApi {
    /// Every health check answers `status`
    pub fn always(status: u16) -> Self {
        Self::scripted(Vec::new(), Ok(status))
    }

    /// Every health check fails at the transport level
    pub fn unreachable() -> Self {
        Self::scripted(
            Vec::new(),
            Err(ApiError::Transport("connection refused".to_string())),
        )
    }

    pub fn scripted(script: Vec<Result<u16, ApiError>>, fallback: Result<u16, ApiError>) -> Self {
        Self {
            statuses: Mutex::new(script.into()),
            fallback,
            login: Ok(Some("tok-123".to_string())),
            health_calls: AtomicU32::new(0),
            logins: Mutex::new(Vec::new()),
        }
    }

    pub fn with_login(mut self, login: Result<Option<String>, ApiError>) -> Self {
        self.login = login;
        self
    }

    pub fn calls(&self) -> u32 {
        self.health_calls.load(Ordering::SeqCst)
    }
}

impl ManagementApi for ScriptedApi {
    fn endpoint(&self) -> &str {
        "https://fm.test"
    }

    fn system_status(&self) -> Result<u16, ApiError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn login(&self, username: &str, password: &str) -> Result<Option<String>, ApiError> {
        self.logins
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string()));
        self.login.clone()
    }
}

/// One command as seen by `MockShell`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCall {
    pub address: String,
    pub command: String,
    pub stdin: Option<String>,
}

/// Remote shell that fails for selected hosts and records the rest
#[derive(Default)]
pub struct MockShell {
    unreachable: HashSet<String>,
    write_fails: HashSet<String>,
    cancel_on: Option<(String, CancelToken)>,
    pub calls: Mutex<Vec<ShellCall>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Behave like ssh failing to connect (exit 255)
    pub fn unreachable(mut self, address: &str) -> Self {
        self.unreachable.insert(address.to_string());
        self
    }

    /// Connect fine but fail any command fed through stdin
    pub fn write_fails(mut self, address: &str) -> Self {
        self.write_fails.insert(address.to_string());
        self
    }

    /// Trip `token` while the first command for `address` is running
    pub fn cancels_on(mut self, address: &str, token: &CancelToken) -> Self {
        self.cancel_on = Some((address.to_string(), token.clone()));
        self
    }

    pub fn calls_for(&self, address: &str) -> Vec<ShellCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.address == address)
            .cloned()
            .collect()
    }
}

impl RemoteShell for MockShell {
    fn run(
        &self,
        target: &Target,
        command: &str,
        stdin: Option<&str>,
    ) -> Result<CommandOutput, RemoteError> {
        self.calls.lock().unwrap().push(ShellCall {
            address: target.address().to_string(),
            command: command.to_string(),
            stdin: stdin.map(str::to_string),
        });

        if let Some((address, token)) = &self.cancel_on {
            if address == target.address() {
                token.cancel();
            }
        }

        if self.unreachable.contains(target.address()) {
            return Ok(CommandOutput {
                status: Some(255),
                stdout: String::new(),
                stderr: format!(
                    "ssh: connect to host {} port 22: Connection timed out",
                    target.address()
                ),
            });
        }
        if stdin.is_some() && self.write_fails.contains(target.address()) {
            return Ok(CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "sudo: a password is required".to_string(),
            });
        }
        Ok(CommandOutput {
            status: Some(0),
            ..Default::default()
        })
    }
}

/// Probe answering from a fixed reachable set
#[derive(Default)]
pub struct MockProbe {
    reachable: HashSet<String>,
    broken: HashSet<String>,
}

impl MockProbe {
    pub fn reachable(addresses: &[&str]) -> Self {
        Self {
            reachable: addresses.iter().map(|a| a.to_string()).collect(),
            broken: HashSet::new(),
        }
    }

    /// Make the probe mechanism itself error for `address`
    pub fn broken_for(mut self, address: &str) -> Self {
        self.broken.insert(address.to_string());
        self
    }
}

impl ReachabilityProbe for MockProbe {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        if self.broken.contains(address) {
            return Err(ProbeError("ping: permission denied".to_string()));
        }
        Ok(self.reachable.contains(address))
    }
}

/// Registry that returns a fixed result and records calls
pub struct MockRegistry {
    result: Result<(), RegistrationError>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl MockRegistry {
    pub fn ok() -> Self {
        Self {
            result: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(RegistrationError::Unavailable("503 from registry".to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl DomainRegistry for MockRegistry {
    fn register(&self, group: &str, subgroup: &str, token: &str) -> Result<(), RegistrationError> {
        self.calls
            .lock()
            .unwrap()
            .push((group.to_string(), subgroup.to_string(), token.to_string()));
        self.result.clone()
    }
}

/// Step runner that fails on a named step
#[derive(Default)]
pub struct MockStepRunner {
    fail_on: Option<String>,
    pub ran: Mutex<Vec<String>>,
}

impl MockStepRunner {
    pub fn failing_on(step: &str) -> Self {
        Self {
            fail_on: Some(step.to_string()),
            ran: Mutex::new(Vec::new()),
        }
    }
}

impl StepRunner for MockStepRunner {
    fn run(&self, step: &ProvisionStep, _dir: &Path) -> Result<(), String> {
        self.ran.lock().unwrap().push(step.command_line());
        if self.fail_on.as_deref() == Some(step.name.as_str()) {
            return Err("exit status 1".to_string());
        }
        Ok(())
    }
}
