use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use serde_json::json;

use fleetup::presentation::factory::{build_verification, create_bring_up_use_case};

use crate::cli::{ColorWhen, FleetArgs};
use crate::commands::{event_sink, exit_code, load_config, print_config_warnings};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::json as json_out;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::report::{render_verification, verification_json};

pub fn cmd_verify(
    fleet: &FleetArgs,
    strict: bool,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
) -> Result<ExitCode> {
    let loaded = load_config(config_path)?;
    let mut config = loaded.config.clone();
    fleet.apply(&mut config);

    let ui = UiContext::new(json, verbose, color, &config);
    print_config_warnings(&loaded, &ui);

    let endpoints = build_verification(&config.fleet)?;
    let use_case = create_bring_up_use_case(&config)?;

    if ui.json {
        let _ = json_out::emit(json!({
            "event": "start",
            "command": "verify",
            "endpoints": endpoints.len(),
        }));
    } else {
        let mut header = CommandHeader::new(Icon::Verify, "Fleet Verification");
        header.add("Endpoints", endpoints.len().to_string());
        header.add("Workers", config.verify.concurrency.to_string());
        println!("{}", header.render(ui.color, ui.unicode));
    }

    let summary = use_case.verify_only(&endpoints, event_sink("verify", &ui))?;

    if ui.json {
        let _ = json_out::emit(verification_json(&summary));
    } else {
        println!();
        print!("{}", render_verification(&summary, &ui));
    }

    Ok(exit_code(!strict || summary.all_reachable()))
}
