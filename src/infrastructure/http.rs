//! HTTP Management API
//!
//! Implements the `ManagementApi` port with a blocking reqwest client.
//! Lab appliances ship self-signed certificates, so TLS verification is
//! off unless asked for.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ApiError, ManagementApi};
use crate::error::FleetResult;

pub const SYSTEM_PATH: &str = "/api/v1.2/system";
pub const AUTH_PATH: &str = "/api/v1.2/authen";

const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Per-attempt timeout for the health check
    pub health_timeout: Duration,
    /// Timeout for the login request
    pub login_timeout: Duration,
    pub verify_tls: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            health_timeout: Duration::from_secs(5),
            login_timeout: Duration::from_secs(10),
            verify_tls: false,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

pub struct HttpManagementApi {
    client: Client,
    base_url: String,
    options: HttpOptions,
}

impl HttpManagementApi {
    pub fn new(endpoint: &str, options: HttpOptions) -> FleetResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!options.verify_tls)
            .connect_timeout(options.health_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(endpoint),
            options,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Bare hosts become `https://host`; full URLs are kept minus a trailing slash.
pub fn base_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

/// reqwest's top-level message hides the cause; walk the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn truncate(body: String) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

impl ManagementApi for HttpManagementApi {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn system_status(&self) -> Result<u16, ApiError> {
        self.client
            .get(self.url(SYSTEM_PATH))
            .timeout(self.options.health_timeout)
            .send()
            .map(|response| response.status().as_u16())
            .map_err(|e| ApiError::Transport(describe(&e)))
    }

    fn login(&self, username: &str, password: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .client
            .post(self.url(AUTH_PATH))
            .timeout(self.options.login_timeout)
            .json(&LoginRequest { username, password })
            .send()
            .map_err(|e| ApiError::Transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate(body),
            });
        }

        let body: LoginResponse = response
            .json()
            .map_err(|e| ApiError::Decode(describe(&e)))?;
        Ok(body.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_defaults_to_https() {
        assert_eq!(base_url("10.0.0.1"), "https://10.0.0.1");
        assert_eq!(base_url(" fm.lab:8443 "), "https://fm.lab:8443");
    }

    #[test]
    fn full_url_is_kept() {
        assert_eq!(base_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let out = truncate(body);
        assert_eq!(out.len(), MAX_ERROR_BODY + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn login_response_tolerates_missing_token() {
        let parsed: LoginResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(parsed.token.is_none());
    }

    #[test]
    fn endpoint_reports_normalized_url() {
        let api = HttpManagementApi::new("10.0.0.1", HttpOptions::default()).unwrap();
        assert_eq!(api.endpoint(), "https://10.0.0.1");
        assert_eq!(api.url(SYSTEM_PATH), "https://10.0.0.1/api/v1.2/system");
    }
}
