//! Test environment builder for isolated fleetup runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables that would leak the developer's settings into a test run
const SCRUBBED_ENV: &[&str] = &[
    "FLEETUP_LOG",
    "FLEETUP_READY_ATTEMPTS",
    "FLEETUP_READY_INTERVAL",
    "FLEETUP_READY_DEADLINE",
    "FLEETUP_PUSH_CONCURRENCY",
    "FLEETUP_VERIFY_CONCURRENCY",
    "FLEETUP_FM_PASSWORD",
    "FLEETUP_KNOWN_HOSTS",
    "FLEETUP_INSECURE_HOST_KEYS",
    "FLEETUP_COLOR",
];

/// A proxy from the host environment would swallow loopback requests
pub const PROXY_ENV: &[&str] = &[
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "ALL_PROXY",
    "http_proxy",
    "https_proxy",
    "all_proxy",
];

/// Drop proxy settings for clients built inside the test process
pub fn clear_proxy_env() {
    for key in PROXY_ENV {
        std::env::remove_var(key);
    }
}

/// Result of running a fleetup command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, skipping blank lines
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("not JSON ({e}): {l}\nstdout:\n{}", self.stdout))
            })
            .collect()
    }
}

/// Isolated working directory and HOME for one test
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("create project dir"),
            home_dir: tempfile::tempdir().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_fleetup")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write project file");
        path
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1");

        for key in SCRUBBED_ENV.iter().chain(PROXY_ENV) {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("failed to execute fleetup"))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
