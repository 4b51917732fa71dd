//! Monitoring domain registry port
//!
//! Narrow interface for creating a group/subgroup on the management
//! endpoint. Re-registering an existing domain must succeed.

use thiserror::Error;

/// Registration failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("registry rejected {group}/{subgroup}: {message}")]
    Rejected {
        group: String,
        subgroup: String,
        message: String,
    },

    #[error("registry unreachable: {0}")]
    Unavailable(String),
}

pub trait DomainRegistry: Send + Sync {
    fn register(&self, group: &str, subgroup: &str, token: &str) -> Result<(), RegistrationError>;
}
