//! Reachability probe port

use std::fmt;

/// The probing mechanism itself failed (distinct from "host unreachable")
#[derive(Debug)]
pub struct ProbeError(pub String);

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe failed: {}", self.0)
    }
}

impl std::error::Error for ProbeError {}

/// Single round-trip network check with a short timeout
pub trait ReachabilityProbe: Send + Sync {
    fn probe(&self, address: &str) -> Result<bool, ProbeError>;
}
