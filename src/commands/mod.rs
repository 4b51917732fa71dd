pub mod configure;
pub mod deploy;
pub mod render;
pub mod verify;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use fleetup::config::{self, LoadedConfig};
use fleetup::domain::ports::FleetEventSink;
use fleetup::infrastructure::JsonEventSink;

use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::events::ConsoleEventSink;

/// Exit status for a run that finished but left work undone
pub const EXIT_INCOMPLETE: u8 = 1;

pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    Ok(config::load(path)?)
}

/// Surface unknown config keys without failing the run
pub fn print_config_warnings(loaded: &LoadedConfig, ui: &UiContext) {
    for warning in &loaded.warnings {
        if ui.json {
            let _ = json::emit(json!({
                "event": "config_warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
            continue;
        }

        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        let hint = warning
            .suggestion
            .as_ref()
            .map(|s| format!(" (did you mean '{}'?)", s))
            .unwrap_or_default();
        eprintln!(
            "{} unknown config key '{}' in {}{}",
            Icon::Warning.colored(ui.color, ui.unicode),
            warning.key,
            location,
            hint
        );
    }
}

pub fn event_sink(command: &'static str, ui: &UiContext) -> Arc<dyn FleetEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout(command))
    } else {
        Arc::new(ConsoleEventSink::stdout(*ui))
    }
}

pub fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INCOMPLETE)
    }
}
