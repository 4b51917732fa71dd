//! Management API port
//!
//! The two calls the bring-up needs from the management endpoint (FM).
//! The HTTP implementation lives in `infrastructure::http`.

use std::fmt;

/// Management API failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response at all (refused, timeout, TLS failure)
    Transport(String),
    /// Endpoint answered with a non-success status
    Status { status: u16, body: String },
    /// Response body was not what we expected
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Status { status, body } if body.is_empty() => {
                write!(f, "HTTP {}", status)
            }
            ApiError::Status { status, body } => write!(f, "HTTP {}: {}", status, body),
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Management endpoint operations
pub trait ManagementApi: Send + Sync {
    /// Base URL, for reporting
    fn endpoint(&self) -> &str;

    /// Status code of the system health resource.
    ///
    /// Any status is `Ok`; only a missing response is an error.
    fn system_status(&self) -> Result<u16, ApiError>;

    /// Exchange credentials for a token.
    ///
    /// `Ok(None)` means the login succeeded but the body had no token.
    fn login(&self, username: &str, password: &str) -> Result<Option<String>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_omits_empty_body() {
        let err = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn status_display_includes_body() {
        let err = ApiError::Status {
            status: 401,
            body: "bad password".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: bad password");
    }
}
