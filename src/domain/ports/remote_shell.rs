//! Remote shell port
//!
//! Runs one command on a fleet member, optionally feeding it stdin.

use std::fmt;

use crate::domain::entities::Target;

/// Captured result of a remote command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit status, `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Short diagnostic for reports: stderr if present, else the status
    pub fn describe_failure(&self) -> String {
        let stderr = self.stderr.trim();
        match (stderr.is_empty(), self.status) {
            (false, _) => stderr.to_string(),
            (true, Some(code)) => format!("exit status {}", code),
            (true, None) => "terminated by signal".to_string(),
        }
    }
}

/// Remote shell failures that happen before a command produces a status
#[derive(Debug)]
pub enum RemoteError {
    /// The local ssh client could not be started
    Spawn(std::io::Error),
    /// Writing stdin or collecting output failed
    Io(std::io::Error),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Spawn(err) => write!(f, "failed to start ssh: {}", err),
            RemoteError::Io(err) => write!(f, "ssh I/O error: {}", err),
        }
    }
}

impl std::error::Error for RemoteError {}

pub trait RemoteShell: Send + Sync {
    fn run(
        &self,
        target: &Target,
        command: &str,
        stdin: Option<&str>,
    ) -> Result<CommandOutput, RemoteError>;
}
