//! Application Layer - Use Cases
//!
//! Each phase of a bring-up is its own small use case; `BringUpUseCase`
//! sequences them. All I/O goes through domain ports.

pub mod bring_up;
pub mod orchestrator;
pub mod provision;
pub mod pusher;
pub mod readiness;
pub mod registrar;
pub mod session;
pub mod verifier;
pub mod worker_pool;

#[cfg(test)]
pub(crate) mod testing;

pub use bring_up::{
    BringUpPlan, BringUpReport, BringUpSettings, BringUpUseCase, DEFAULT_PUSH_WORKERS,
    DEFAULT_VERIFY_WORKERS,
};
pub use orchestrator::FleetOrchestrator;
pub use provision::{terraform_steps, ProvisionUseCase};
pub use pusher::{PushOptions, RemoteConfigPusher};
pub use readiness::{ReadinessOutcome, ReadinessPoller};
pub use registrar::{DomainRegistrar, RegistrationPolicy};
pub use session::SessionClient;
pub use verifier::ConnectivityVerifier;
pub use worker_pool::WorkerPool;
