//! SSH Remote Shell
//!
//! Implements the `RemoteShell` port by driving the system `ssh` client,
//! so agent forwarding, ProxyJump and ssh_config all keep working.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::domain::entities::Target;
use crate::domain::ports::{CommandOutput, RemoteError, RemoteShell};
use crate::domain::value_objects::HostKeyPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOptions {
    /// ssh binary to run
    pub program: String,
    pub connect_timeout: Duration,
    pub host_keys: HostKeyPolicy,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            connect_timeout: Duration::from_secs(10),
            host_keys: HostKeyPolicy::default(),
        }
    }
}

pub struct SshShell {
    options: SshOptions,
}

impl SshShell {
    pub fn new(options: SshOptions) -> Self {
        Self { options }
    }

    /// Full argument list for one remote command
    pub fn args(&self, target: &Target, command: &str) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            target.credentials().private_key().display().to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.options.connect_timeout.as_secs().max(1)),
        ];

        match &self.options.host_keys {
            HostKeyPolicy::KnownHosts(path) => {
                args.push("-o".to_string());
                args.push("StrictHostKeyChecking=yes".to_string());
                args.push("-o".to_string());
                args.push(format!("UserKnownHostsFile={}", path.display()));
            }
            HostKeyPolicy::System => {
                args.push("-o".to_string());
                args.push("StrictHostKeyChecking=yes".to_string());
            }
            HostKeyPolicy::TrustOnFirstUse => {
                args.push("-o".to_string());
                args.push("StrictHostKeyChecking=no".to_string());
                args.push("-o".to_string());
                args.push("UserKnownHostsFile=/dev/null".to_string());
                args.push("-o".to_string());
                args.push("LogLevel=ERROR".to_string());
            }
        }

        args.push(target.ssh_destination());
        args.push(command.to_string());
        args
    }
}

impl RemoteShell for SshShell {
    fn run(
        &self,
        target: &Target,
        command: &str,
        stdin: Option<&str>,
    ) -> Result<CommandOutput, RemoteError> {
        let mut child = Command::new(&self.options.program)
            .args(self.args(target, command))
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RemoteError::Spawn)?;

        if let Some(input) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                // ssh exits early on connection failure; its stderr says why.
                if let Err(err) = pipe.write_all(input.as_bytes()) {
                    if err.kind() != std::io::ErrorKind::BrokenPipe {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RemoteError::Io(err));
                    }
                }
            }
        }

        let output = child.wait_with_output().map_err(RemoteError::Io)?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
