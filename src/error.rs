//! Error types for fleetup
//!
//! Uses `thiserror` for library errors. Only a handful of these abort a
//! bring-up run; per-host failures are captured into outcome records instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::RegistrationError;

/// Result type alias for fleetup operations
pub type FleetResult<T> = Result<T, FleetError>;

/// Main error type for fleetup operations
#[derive(Error, Debug)]
pub enum FleetError {
    /// Management endpoint never answered with 200/401 within the retry policy
    #[error("management endpoint {endpoint} not ready after {attempts} attempts")]
    NotReady { endpoint: String, attempts: u32 },

    /// Bad credentials, transport failure during login, or unusable token
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Monitoring domain could not be registered
    #[error("monitoring domain registration failed: {0}")]
    Registration(#[from] RegistrationError),

    /// Connect, write or restart failure on one host
    #[error("remote configuration failed on {address}: {message}")]
    RemoteConfig { address: String, message: String },

    /// Registration record field failed validation
    #[error("invalid registration record: {field} {reason}")]
    InvalidRecord {
        field: &'static str,
        reason: &'static str,
    },

    /// Operator aborted the run
    #[error("run cancelled during {phase}")]
    Cancelled { phase: &'static str },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A required input was given neither on the command line nor in config
    #[error("missing required setting '{0}' (pass it as a flag or set it in [fleet])")]
    MissingSetting(&'static str),

    /// External provisioning step failed
    #[error("provisioning step '{step}' failed: {message}")]
    Provision { step: String, message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FleetError {
    /// Whether this error ends the whole run rather than a single host's work
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FleetError::RemoteConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_ready() {
        let err = FleetError::NotReady {
            endpoint: "https://10.0.0.1".to_string(),
            attempts: 60,
        };
        assert_eq!(
            err.to_string(),
            "management endpoint https://10.0.0.1 not ready after 60 attempts"
        );
    }

    #[test]
    fn test_error_display_invalid_record() {
        let err = FleetError::InvalidRecord {
            field: "token",
            reason: "must not be empty",
        };
        assert_eq!(
            err.to_string(),
            "invalid registration record: token must not be empty"
        );
    }

    #[test]
    fn remote_config_failures_are_not_fatal() {
        let err = FleetError::RemoteConfig {
            address: "10.0.1.5".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(!err.is_fatal());
        assert!(FleetError::Cancelled { phase: "readiness" }.is_fatal());
    }
}
