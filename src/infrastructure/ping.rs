//! ICMP reachability via the system `ping`

use std::process::{Command, Stdio};
use std::time::Duration;

use crate::domain::ports::{ProbeError, ReachabilityProbe};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct PingProbe {
    program: String,
    timeout: Duration,
}

impl PingProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "ping".to_string(),
            timeout,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

/// One packet, short wait. Flag units differ per platform.
pub fn ping_args(os: &str, address: &str, timeout: Duration) -> Vec<String> {
    let millis = timeout.as_millis().max(1);
    let (count_flag, wait) = match os {
        "windows" => ("-n", vec!["-w".to_string(), millis.to_string()]),
        "macos" => ("-c", vec!["-W".to_string(), millis.to_string()]),
        _ => {
            let secs = timeout.as_secs_f64().ceil().max(1.0) as u64;
            ("-c", vec!["-W".to_string(), secs.to_string()])
        }
    };

    let mut args = vec![count_flag.to_string(), "1".to_string()];
    args.extend(wait);
    args.push(address.to_string());
    args
}

impl ReachabilityProbe for PingProbe {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        Command::new(&self.program)
            .args(ping_args(std::env::consts::OS, address, self.timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .map_err(|e| ProbeError(format!("{}: {}", self.program, e)))
    }
}
