//! Monitoring domain registry
//!
//! The management API does not publish a domain-creation call yet, so the
//! shipped registry only records the request. Swap in a real
//! `DomainRegistry` through `presentation::factory` once it does.

use tracing::info;

use crate::domain::ports::{DomainRegistry, RegistrationError};

#[derive(Debug, Default)]
pub struct LoggingDomainRegistry;

impl DomainRegistry for LoggingDomainRegistry {
    fn register(&self, group: &str, subgroup: &str, _token: &str) -> Result<(), RegistrationError> {
        info!(group, subgroup, "monitoring domain registration requested");
        Ok(())
    }
}
