//! fleetup CLI - bring a freshly provisioned monitoring fleet online
//!
//! Usage: fleetup <COMMAND>
//!
//! Commands:
//!   configure  Register the monitoring domain and push it to every host
//!   verify     Probe the fleet for reachability
//!   deploy     Provision with terraform, then configure
//!   render     Print the registration document

mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use fleetup::CancelToken;

use cli::{Cli, ColorWhen, Commands};
use ui::primitives::text::ColoredText;

/// Overrides the `-v` derived filter, e.g. `FLEETUP_LOG=fleetup=trace`
const LOG_ENV: &str = "FLEETUP_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&cli, &err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Configure { fleet, run } => commands::configure::cmd_configure(
            fleet,
            run,
            config_path,
            cli.json,
            cli.verbose,
            cli.color,
            &cancel,
        ),
        Commands::Verify { fleet, strict } => commands::verify::cmd_verify(
            fleet,
            *strict,
            config_path,
            cli.json,
            cli.verbose,
            cli.color,
        ),
        Commands::Deploy {
            terraform_dir,
            terraform,
            skip_provision,
            fleet,
            run,
        } => commands::deploy::cmd_deploy(
            &commands::deploy::DeployRequest {
                terraform_dir,
                terraform,
                skip_provision: *skip_provision,
                fleet,
                run,
            },
            config_path,
            cli.json,
            cli.verbose,
            cli.color,
            &cancel,
        ),
        Commands::Render {
            group,
            subgroup,
            token,
            remote_ip,
            remote_port,
        } => commands::render::cmd_render(
            group,
            subgroup,
            token,
            remote_ip,
            *remote_port,
            cli.json,
        ),
    }
}

fn report_error(cli: &Cli, err: &anyhow::Error) {
    if cli.json {
        let _ = ui::json::emit(json!({
            "event": "error",
            "message": format!("{:#}", err),
        }));
        return;
    }

    let color = match cli.color {
        Some(ColorWhen::Never) => false,
        Some(ColorWhen::Always) => true,
        Some(ColorWhen::Auto) | None => ui::terminal::detect_capabilities().supports_color,
    };
    eprintln!(
        "{} {:#}",
        ColoredText::error("Error:").bold().render(color),
        err
    );
}
