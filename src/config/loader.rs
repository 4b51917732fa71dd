//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{FleetError, FleetResult};

use super::types::{ColorMode, Config};

/// Picked up from the working directory when `--config` is not given
pub const PROJECT_CONFIG_FILE: &str = "fleetup.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Result of resolving the config file hierarchy
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// File the settings came from, if any
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> FleetResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| FleetError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config file and apply env overrides.
///
/// An explicit path must exist. Otherwise `./fleetup.toml` is tried, then
/// the user config dir, then built-in defaults.
pub fn load(explicit: Option<&Path>) -> FleetResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(),
    };

    let mut loaded = LoadedConfig::default();
    if let Some(path) = candidate {
        debug!(path = %path.display(), "loading configuration");
        let (config, warnings) = load_with_warnings(&path)?;
        loaded = LoadedConfig {
            config,
            warnings,
            source: Some(path),
        };
    }

    loaded.config = with_env_overrides(loaded.config);
    Ok(loaded)
}

fn discover() -> Option<PathBuf> {
    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join("fleetup").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Apply environment variable overrides (FLEETUP_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Same as `with_env_overrides`, reading variables through `env`
pub fn apply_env_overrides<F>(mut config: Config, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // FLEETUP_READY_ATTEMPTS
    if let Some(n) = parse_env(&env, "FLEETUP_READY_ATTEMPTS") {
        config.readiness.max_attempts = n;
    }

    // FLEETUP_READY_INTERVAL (seconds)
    if let Some(secs) = parse_env(&env, "FLEETUP_READY_INTERVAL") {
        config.readiness.interval_secs = secs;
    }

    // FLEETUP_READY_DEADLINE (seconds)
    if let Some(secs) = parse_env(&env, "FLEETUP_READY_DEADLINE") {
        config.readiness.deadline_secs = Some(secs);
    }

    // FLEETUP_PUSH_CONCURRENCY
    if let Some(n) = parse_env(&env, "FLEETUP_PUSH_CONCURRENCY") {
        config.push.concurrency = n;
    }

    // FLEETUP_VERIFY_CONCURRENCY
    if let Some(n) = parse_env(&env, "FLEETUP_VERIFY_CONCURRENCY") {
        config.verify.concurrency = n;
    }

    // FLEETUP_FM_PASSWORD keeps the secret off the command line
    if let Some(password) = env("FLEETUP_FM_PASSWORD").filter(|p| !p.is_empty()) {
        config.fleet.fm_password = Some(password);
    }

    // FLEETUP_KNOWN_HOSTS
    if let Some(path) = env("FLEETUP_KNOWN_HOSTS").filter(|p| !p.is_empty()) {
        config.ssh.known_hosts = Some(PathBuf::from(path));
    }

    // FLEETUP_INSECURE_HOST_KEYS
    if let Some(val) = env("FLEETUP_INSECURE_HOST_KEYS") {
        config.ssh.insecure_host_keys = is_truthy(&val);
    }

    // FLEETUP_COLOR
    if let Some(mode) = env("FLEETUP_COLOR") {
        config.output.color = match mode.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

fn parse_env<F, T>(env: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "readiness",
        "max_attempts",
        "interval_secs",
        "request_timeout_secs",
        "deadline_secs",
        "auth",
        "username",
        "verify_tls",
        "push",
        "concurrency",
        "config_path",
        "agent_service",
        "connect_timeout_secs",
        "remote_port",
        "verify",
        "probe_timeout_secs",
        "ssh",
        "known_hosts",
        "insecure_host_keys",
        "output",
        "color",
        "unicode",
        "fleet",
        "fm_ip",
        "controller_ip",
        "controller_public_ip",
        "key_path",
        "fm_group",
        "fm_subgroup",
        "fm_password",
        "prod_ips",
        "secondary_ip",
        "tool_ip",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
