use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use serde_json::json;

use fleetup::presentation::factory::{build_plan, create_bring_up_use_case};
use fleetup::{BringUpReport, CancelToken, Config, RegistrationPolicy};

use crate::cli::{ColorWhen, FleetArgs, RunArgs};
use crate::commands::{event_sink, exit_code, load_config, print_config_warnings};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::json as json_out;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::report::{bring_up_json, render_bring_up};

pub fn cmd_configure(
    fleet: &FleetArgs,
    run: &RunArgs,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
    cancel: &CancelToken,
) -> Result<ExitCode> {
    let loaded = load_config(config_path)?;
    let mut config = loaded.config.clone();
    fleet.apply(&mut config);
    run.apply(&mut config);

    let ui = UiContext::new(json, verbose, color, &config);
    print_config_warnings(&loaded, &ui);

    let report = bring_up(&config, run, &ui, "configure", cancel)?;
    Ok(exit_code(run_succeeded(&report, run.strict)))
}

/// Readiness, login, registration, push and verification, with header and summary.
///
/// Errors are the run-aborting failures; everything per-host lands in the report.
pub fn bring_up(
    config: &Config,
    run: &RunArgs,
    ui: &UiContext,
    command: &'static str,
    cancel: &CancelToken,
) -> Result<BringUpReport> {
    let policy = if run.strict_registration {
        RegistrationPolicy::Fatal
    } else {
        RegistrationPolicy::Warn
    };
    let plan = build_plan(config, policy)?;
    let use_case = create_bring_up_use_case(config)?;
    let endpoint = config.fleet.fm_ip.clone().unwrap_or_default();

    if ui.json {
        let _ = json_out::emit(json!({
            "event": "start",
            "command": command,
            "endpoint": endpoint,
            "group": plan.group,
            "subgroup": plan.subgroup,
            "hosts": plan.production.len() + 1,
            "endpoints": plan.verification.len(),
        }));
    } else {
        let mut header = CommandHeader::new(Icon::Configure, "Fleet Bring-Up");
        header.add("Endpoint", endpoint);
        header.add("Domain", format!("{}/{}", plan.group, plan.subgroup));
        header.add(
            "Hosts",
            format!("1 controller + {} production", plan.production.len()),
        );
        header.add("Workers", config.push.concurrency.to_string());
        println!("{}", header.render(ui.color, ui.unicode));
    }

    let report = use_case.execute(&plan, event_sink(command, ui), cancel)?;

    if ui.json {
        let _ = json_out::emit(bring_up_json(command, &report));
    } else {
        println!();
        print!("{}", render_bring_up(&report, ui));
    }

    Ok(report)
}

/// Per-host trouble only fails the run under `--strict`
pub fn run_succeeded(report: &BringUpReport, strict: bool) -> bool {
    if report.cancelled {
        return false;
    }
    !strict || report.fleet_healthy()
}
