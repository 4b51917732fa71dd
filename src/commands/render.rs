use std::process::ExitCode;

use anyhow::Result;
use serde_json::json;

use fleetup::RegistrationRecord;

use crate::ui::json as json_out;

pub fn cmd_render(
    group: &str,
    subgroup: &str,
    token: &str,
    remote_ip: &str,
    remote_port: u16,
    json: bool,
) -> Result<ExitCode> {
    let record = RegistrationRecord::new(group, subgroup, token, remote_ip, remote_port)?;
    let document = record.render();

    if json {
        json_out::emit(json!({
            "event": "rendered",
            "command": "render",
            "document": document,
        }))?;
    } else {
        print!("{}", document);
    }

    Ok(ExitCode::SUCCESS)
}
