//! Configuration module for fleetup
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FLEETUP_*)
//! 3. Config file (`--config`, ./fleetup.toml, or ~/.config/fleetup/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, load, with_env_overrides, ConfigWarning, LoadedConfig,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    AuthConfig, ColorMode, Config, FleetConfig, OutputConfig, PushConfig, ReadinessConfig,
    SshConfig, VerifyConfig,
};
