//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::pusher::DEFAULT_AGENT_SERVICE;
use crate::application::{DEFAULT_PUSH_WORKERS, DEFAULT_VERIFY_WORKERS};
use crate::domain::entities::{DEFAULT_CONFIG_PATH, DEFAULT_REMOTE_PORT};
use crate::domain::value_objects::{HostKeyPolicy, RetryPolicy};
use crate::error::FleetResult;

use super::loader::{self, ConfigWarning};

fn default_true() -> bool {
    true
}

/// Readiness polling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_health_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Overall cap on polling, independent of attempts
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_secs: default_interval_secs(),
            request_timeout_secs: default_health_timeout_secs(),
            deadline_secs: None,
        }
    }
}

fn default_max_attempts() -> u32 {
    60
}

fn default_interval_secs() -> u64 {
    10
}

fn default_health_timeout_secs() -> u64 {
    5
}

impl ReadinessConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(self.max_attempts, Duration::from_secs(self.interval_secs));
        match self.deadline_secs {
            Some(secs) => policy.with_deadline_in(Duration::from_secs(secs)),
            None => policy,
        }
    }
}

/// Management API login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_fm_username")]
    pub username: String,

    #[serde(default = "default_login_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Verify the management endpoint's TLS certificate
    #[serde(default)]
    pub verify_tls: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_fm_username(),
            request_timeout_secs: default_login_timeout_secs(),
            verify_tls: false,
        }
    }
}

fn default_fm_username() -> String {
    "admin".to_string()
}

fn default_login_timeout_secs() -> u64 {
    10
}

/// Remote configuration push
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default = "default_push_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_config_path")]
    pub config_path: String,

    #[serde(default = "default_agent_service")]
    pub agent_service: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_remote_port")]
    pub remote_port: u16,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            concurrency: default_push_concurrency(),
            config_path: default_config_path(),
            agent_service: default_agent_service(),
            connect_timeout_secs: default_connect_timeout_secs(),
            remote_port: default_remote_port(),
        }
    }
}

fn default_push_concurrency() -> usize {
    DEFAULT_PUSH_WORKERS
}

fn default_config_path() -> String {
    DEFAULT_CONFIG_PATH.to_string()
}

fn default_agent_service() -> String {
    DEFAULT_AGENT_SERVICE.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_remote_port() -> u16 {
    DEFAULT_REMOTE_PORT
}

/// Connectivity sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default = "default_verify_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            concurrency: default_verify_concurrency(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

fn default_verify_concurrency() -> usize {
    DEFAULT_VERIFY_WORKERS
}

fn default_probe_timeout_secs() -> u64 {
    2
}

/// Host key trust
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SshConfig {
    /// known_hosts allow-list produced by provisioning
    #[serde(default)]
    pub known_hosts: Option<PathBuf>,

    /// Accept any host key (lab use only)
    #[serde(default)]
    pub insecure_host_keys: bool,
}

impl SshConfig {
    pub fn host_key_policy(&self) -> HostKeyPolicy {
        HostKeyPolicy::resolve(self.known_hosts.clone(), self.insecure_host_keys)
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Fleet inputs, mirroring the `configure` flags
///
/// Provisioning templates can render this section so `deploy` needs no flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FleetConfig {
    #[serde(default)]
    pub fm_ip: Option<String>,

    #[serde(default)]
    pub controller_ip: Option<String>,

    #[serde(default)]
    pub controller_public_ip: Option<String>,

    #[serde(default)]
    pub key_path: Option<PathBuf>,

    #[serde(default)]
    pub fm_group: Option<String>,

    #[serde(default)]
    pub fm_subgroup: Option<String>,

    #[serde(default)]
    pub fm_password: Option<String>,

    /// Each entry may itself be comma-separated
    #[serde(default)]
    pub prod_ips: Vec<String>,

    #[serde(default)]
    pub secondary_ip: Option<String>,

    #[serde(default)]
    pub tool_ip: Option<String>,

    /// Remote login user (defaults to `azureuser`)
    #[serde(default)]
    pub username: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub readiness: ReadinessConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub verify: VerifyConfig,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub fleet: FleetConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> FleetResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> FleetResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (FLEETUP_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
