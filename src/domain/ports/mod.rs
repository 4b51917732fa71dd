//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod domain_registry;
pub mod fleet_events;
pub mod management_api;
pub mod provisioner;
pub mod reachability_probe;
pub mod remote_shell;

pub use domain_registry::{DomainRegistry, RegistrationError};
pub use fleet_events::{FleetEvent, FleetEventSink, NoopEventSink};
pub use management_api::{ApiError, ManagementApi};
pub use provisioner::{ProvisionStep, StepRunner};
pub use reachability_probe::{ProbeError, ReachabilityProbe};
pub use remote_shell::{CommandOutput, RemoteError, RemoteShell};
