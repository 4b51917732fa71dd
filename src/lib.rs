//! fleetup - bring a freshly provisioned monitoring fleet online
//!
//! Waits for the management endpoint, logs in, registers the monitoring
//! domain, pushes the registration document to the controller and every
//! production host, then sweeps the fleet for reachability.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{BringUpPlan, BringUpReport, BringUpUseCase, RegistrationPolicy};
pub use config::Config;
pub use domain::entities::{RegistrationRecord, Target};
pub use domain::value_objects::CancelToken;
pub use error::{FleetError, FleetResult};
