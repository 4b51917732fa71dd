//! Provisioning port
//!
//! Infrastructure creation is owned by an external tool; fleetup only runs
//! its steps as opaque commands and checks their exit status.

use std::path::Path;

/// One opaque provisioning command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStep {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
}

impl ProvisionStep {
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Command line for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait StepRunner {
    /// Run a step in `dir`; `Err` carries a human-readable reason.
    fn run(&self, step: &ProvisionStep, dir: &Path) -> Result<(), String>;
}
