//! Authenticated management session

use chrono::{DateTime, Utc};

use crate::error::{FleetError, FleetResult};

/// Bearer token obtained from the management endpoint.
///
/// Lives for one run only. Never refreshed or revoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            issued_at: Utc::now(),
        }
    }

    /// Raw token as returned by the endpoint, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Token for downstream use. A login response without a token is an
    /// authentication failure, never an empty credential.
    pub fn require_token(&self) -> FleetResult<&str> {
        match self.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(FleetError::Authentication {
                message: "login response carried no token".to_string(),
            }),
        }
    }
}
