//! Provisioning Use Case
//!
//! Runs the external infrastructure tool's init/plan/apply steps in order,
//! stopping at the first failure.

use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{FleetEvent, FleetEventSink, ProvisionStep, StepRunner};
use crate::error::{FleetError, FleetResult};

/// Plan file shared between the plan and apply steps
pub const PLAN_FILE: &str = "tfplan";

/// Terraform init, plan to a file, apply that plan
pub fn terraform_steps(program: &str) -> Vec<ProvisionStep> {
    let plan_out = format!("-out={}", PLAN_FILE);
    vec![
        ProvisionStep::new("Initialize", program, &["init"]),
        ProvisionStep::new("Plan", program, &["plan", plan_out.as_str()]),
        ProvisionStep::new("Apply", program, &["apply", PLAN_FILE]),
    ]
}

pub struct ProvisionUseCase<R: StepRunner> {
    runner: R,
    steps: Vec<ProvisionStep>,
}

impl<R: StepRunner> ProvisionUseCase<R> {
    pub fn new(runner: R, steps: Vec<ProvisionStep>) -> Self {
        Self { runner, steps }
    }

    pub fn execute(&self, dir: &Path, events: Arc<dyn FleetEventSink>) -> FleetResult<()> {
        let total = self.steps.len();
        for (i, step) in self.steps.iter().enumerate() {
            events.on_event(FleetEvent::ProvisionStepStarted {
                index: i + 1,
                total,
                name: step.name.clone(),
                command: step.command_line(),
            });

            if let Err(message) = self.runner.run(step, dir) {
                events.on_event(FleetEvent::ProvisionStepFailed {
                    name: step.name.clone(),
                    error: message.clone(),
                });
                return Err(FleetError::Provision {
                    step: step.command_line(),
                    message,
                });
            }
        }
        Ok(())
    }
}
