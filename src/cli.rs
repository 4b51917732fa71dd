use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use fleetup::Config;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// fleetup - bring a freshly provisioned monitoring fleet online
#[derive(Parser, Debug)]
#[command(name = "fleetup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./fleetup.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the monitoring domain and push it to every host
    Configure {
        #[command(flatten)]
        fleet: FleetArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Only probe the fleet for reachability
    Verify {
        #[command(flatten)]
        fleet: FleetArgs,

        /// Exit non-zero when any endpoint is unreachable
        #[arg(long)]
        strict: bool,
    },

    /// Run terraform init/plan/apply, then configure the fleet
    Deploy {
        /// Directory holding the terraform configuration
        #[arg(long, default_value = ".")]
        terraform_dir: PathBuf,

        /// Terraform executable
        #[arg(long, default_value = "terraform")]
        terraform: String,

        /// Skip provisioning and configure an existing fleet
        #[arg(long)]
        skip_provision: bool,

        #[command(flatten)]
        fleet: FleetArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the registration document without contacting anything
    Render {
        /// Monitoring domain group
        #[arg(long)]
        group: String,

        /// Monitoring domain subgroup
        #[arg(long)]
        subgroup: String,

        /// Session token
        #[arg(long)]
        token: String,

        /// Management endpoint address written into the document
        #[arg(long)]
        remote_ip: String,

        #[arg(long, default_value_t = fleetup::domain::entities::DEFAULT_REMOTE_PORT)]
        remote_port: u16,
    },
}

/// Fleet inventory flags; each one overrides the matching `[fleet]` key
#[derive(Args, Debug, Default, Clone)]
pub struct FleetArgs {
    /// Management endpoint address or URL
    #[arg(long)]
    pub fm_ip: Option<String>,

    /// Controller private address (probed)
    #[arg(long)]
    pub controller_ip: Option<String>,

    /// Controller public address (configured over SSH)
    #[arg(long)]
    pub controller_public_ip: Option<String>,

    /// SSH private key
    #[arg(long)]
    pub key_path: Option<PathBuf>,

    #[arg(long)]
    pub fm_group: Option<String>,

    #[arg(long)]
    pub fm_subgroup: Option<String>,

    /// Management password (prefer FLEETUP_FM_PASSWORD)
    #[arg(long)]
    pub fm_password: Option<String>,

    /// Production host addresses, comma or space separated
    #[arg(long)]
    pub prod_ips: Vec<String>,

    /// Secondary appliance, verified but not configured
    #[arg(long)]
    pub secondary_ip: Option<String>,

    /// Tool host, verified but not configured
    #[arg(long)]
    pub tool_ip: Option<String>,

    /// Remote SSH user
    #[arg(long)]
    pub username: Option<String>,

    /// Management API user
    #[arg(long)]
    pub fm_username: Option<String>,

    /// Pin host keys against this known_hosts file
    #[arg(long, conflicts_with = "insecure_host_keys")]
    pub known_hosts: Option<PathBuf>,

    /// Accept any host key (freshly provisioned hosts)
    #[arg(long)]
    pub insecure_host_keys: bool,

    /// Verify the management endpoint certificate
    #[arg(long)]
    pub verify_tls: bool,
}

impl FleetArgs {
    pub fn apply(&self, config: &mut Config) {
        let fleet = &mut config.fleet;
        set(&mut fleet.fm_ip, &self.fm_ip);
        set(&mut fleet.controller_ip, &self.controller_ip);
        set(&mut fleet.controller_public_ip, &self.controller_public_ip);
        set(&mut fleet.key_path, &self.key_path);
        set(&mut fleet.fm_group, &self.fm_group);
        set(&mut fleet.fm_subgroup, &self.fm_subgroup);
        set(&mut fleet.fm_password, &self.fm_password);
        set(&mut fleet.secondary_ip, &self.secondary_ip);
        set(&mut fleet.tool_ip, &self.tool_ip);
        set(&mut fleet.username, &self.username);
        if !self.prod_ips.is_empty() {
            fleet.prod_ips = self.prod_ips.clone();
        }

        if let Some(user) = &self.fm_username {
            config.auth.username = user.clone();
        }
        if self.verify_tls {
            config.auth.verify_tls = true;
        }
        if let Some(path) = &self.known_hosts {
            config.ssh.known_hosts = Some(path.clone());
            config.ssh.insecure_host_keys = false;
        }
        if self.insecure_host_keys {
            config.ssh.insecure_host_keys = true;
        }
    }
}

/// Run-control flags shared by `configure` and `deploy`
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Abort when the monitoring domain cannot be registered
    #[arg(long)]
    pub strict_registration: bool,

    /// Exit non-zero when any host failed or is unreachable
    #[arg(long)]
    pub strict: bool,

    /// Readiness attempts before giving up
    #[arg(long)]
    pub ready_attempts: Option<u32>,

    /// Seconds between readiness attempts
    #[arg(long)]
    pub ready_interval: Option<u64>,

    /// Overall readiness deadline in seconds
    #[arg(long)]
    pub ready_deadline: Option<u64>,

    /// Hosts configured in parallel
    #[arg(long)]
    pub push_concurrency: Option<usize>,
}

impl RunArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(n) = self.ready_attempts {
            config.readiness.max_attempts = n;
        }
        if let Some(secs) = self.ready_interval {
            config.readiness.interval_secs = secs;
        }
        if let Some(secs) = self.ready_deadline {
            config.readiness.deadline_secs = Some(secs);
        }
        if let Some(n) = self.push_concurrency {
            config.push.concurrency = n;
        }
    }
}

fn set<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}
