//! Per-host results of the push and verification phases

use super::target::Target;

/// Result of pushing the registration to one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub target: Target,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl PushOutcome {
    pub fn success(target: Target) -> Self {
        Self {
            target,
            succeeded: true,
            error: None,
        }
    }

    pub fn failure(target: Target, error: impl Into<String>) -> Self {
        Self {
            target,
            succeeded: false,
            error: Some(error.into()),
        }
    }

    /// Outcome for a host that was never attempted because the run was aborted
    pub fn cancelled(target: Target) -> Self {
        Self::failure(target, "cancelled before push started")
    }
}

/// Count successes and failures in a set of outcomes
pub fn tally(outcomes: &[PushOutcome]) -> (usize, usize) {
    let succeeded = outcomes.iter().filter(|o| o.succeeded).count();
    (succeeded, outcomes.len() - succeeded)
}

/// An address to probe plus a human label (e.g. "FM", "prod1")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub description: String,
}

impl Endpoint {
    pub fn new(address: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            description: description.into(),
        }
    }
}

/// Outcome of probing one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub target_description: String,
    pub address: String,
    pub reachable: bool,
}

/// Aggregate of a verification sweep, results in probe input order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReachabilitySummary {
    pub total: usize,
    pub reachable_count: usize,
    pub results: Vec<VerificationResult>,
}

impl ReachabilitySummary {
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let reachable_count = results.iter().filter(|r| r.reachable).count();
        Self {
            total: results.len(),
            reachable_count,
            results,
        }
    }

    pub fn all_reachable(&self) -> bool {
        self.reachable_count == self.total
    }

    pub fn unreachable(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.reachable)
    }
}
