//! Local process runner for provisioning steps

use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::{ProvisionStep, StepRunner};

/// Runs a step with inherited output so the tool's own progress streams live.
#[derive(Debug, Default)]
pub struct CommandStepRunner {
    /// Send the child's stdout to our stderr (keeps NDJSON stdout clean)
    stdout_to_stderr: bool,
}

impl CommandStepRunner {
    pub fn new(stdout_to_stderr: bool) -> Self {
        Self { stdout_to_stderr }
    }
}

impl StepRunner for CommandStepRunner {
    fn run(&self, step: &ProvisionStep, dir: &Path) -> Result<(), String> {
        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };

        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| format!("failed to execute {}: {}", step.program, e))?;

        if status.success() {
            Ok(())
        } else {
            match status.code() {
                Some(code) => Err(format!("exited with code {}", code)),
                None => Err("terminated by signal".to_string()),
            }
        }
    }
}
