use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde_json::json;

use fleetup::config::PROJECT_CONFIG_FILE;
use fleetup::presentation::factory::create_provision_use_case;
use fleetup::{CancelToken, Config, FleetError};

use crate::cli::{ColorWhen, FleetArgs, RunArgs};
use crate::commands::configure::{bring_up, run_succeeded};
use crate::commands::{event_sink, exit_code, load_config, print_config_warnings};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::json as json_out;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::report::render_timing;

pub struct DeployRequest<'a> {
    pub terraform_dir: &'a Path,
    pub terraform: &'a str,
    pub skip_provision: bool,
    pub fleet: &'a FleetArgs,
    pub run: &'a RunArgs,
}

/// `--config` if given, else the file terraform renders next to its configuration
pub fn fleet_config_path(terraform_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| terraform_dir.join(PROJECT_CONFIG_FILE))
}

pub fn cmd_deploy(
    request: &DeployRequest<'_>,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
    cancel: &CancelToken,
) -> Result<ExitCode> {
    let start = Local::now();
    let path = fleet_config_path(request.terraform_dir, config_path);

    // Before apply the file may not exist yet; style output from defaults then.
    let early = if path.is_file() {
        load_config(Some(path.as_path()))
            .map(|loaded| loaded.config)
            .unwrap_or_default()
    } else {
        Config::default()
    };
    let ui = UiContext::new(json, verbose, color, &early);

    let outcome = run_deploy(request, &path, &ui, cancel);

    print_timing(&ui, start, Local::now(), matches!(outcome, Ok(true)));
    Ok(exit_code(outcome?))
}

fn run_deploy(
    request: &DeployRequest<'_>,
    config_path: &Path,
    ui: &UiContext,
    cancel: &CancelToken,
) -> Result<bool> {
    if !request.skip_provision {
        if ui.json {
            let _ = json_out::emit(json!({
                "event": "start",
                "command": "provision",
                "directory": request.terraform_dir.display().to_string(),
            }));
        } else {
            let mut header = CommandHeader::new(Icon::Provision, "Provisioning");
            header.add("Directory", request.terraform_dir.display().to_string());
            header.add("Tool", request.terraform);
            print!("{}", header.render(ui.color, ui.unicode));
        }

        create_provision_use_case(request.terraform, ui.json)
            .execute(request.terraform_dir, event_sink("deploy", ui))?;

        if cancel.is_cancelled() {
            return Err(FleetError::Cancelled {
                phase: "provisioning",
            }
            .into());
        }
        if !ui.json {
            println!();
        }
    }

    if !config_path.is_file() {
        return Err(FleetError::Provision {
            step: "apply".to_string(),
            message: format!(
                "fleet configuration {} was not rendered",
                config_path.display()
            ),
        }
        .into());
    }

    let loaded = load_config(Some(config_path))?;
    let mut config = loaded.config.clone();
    request.fleet.apply(&mut config);
    request.run.apply(&mut config);
    print_config_warnings(&loaded, ui);

    let report = bring_up(&config, request.run, ui, "deploy", cancel)?;
    Ok(run_succeeded(&report, request.run.strict))
}

fn print_timing(ui: &UiContext, start: DateTime<Local>, end: DateTime<Local>, success: bool) {
    if ui.json {
        let elapsed = (end - start).to_std().unwrap_or_default();
        let _ = json_out::emit(json!({
            "event": "timing",
            "command": "deploy",
            "start": start.to_rfc3339(),
            "end": end.to_rfc3339(),
            "elapsed_secs": elapsed.as_secs_f64(),
            "success": success,
        }));
    } else {
        println!();
        println!("{}", render_timing(start, end));
    }
}
