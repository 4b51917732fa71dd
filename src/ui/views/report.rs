//! Closing summaries for configure, verify and deploy

use std::time::Duration;

use chrono::{DateTime, Local};
use serde_json::{json, Value};

use fleetup::domain::entities::ReachabilitySummary;
use fleetup::BringUpReport;

use crate::ui::blocks::summary::ResultSummary;
use crate::ui::context::UiContext;

/// `HHh MMm SSs`, hours not wrapped at 24
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{:02}h {:02}m {:02}s",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

fn add_reachability(summary: &mut ResultSummary, reach: &ReachabilitySummary) {
    for result in &reach.results {
        if result.reachable {
            summary.add_info(format!("{} {}", result.target_description, result.address));
        } else {
            summary.add_warning(format!(
                "{} {} unreachable",
                result.target_description, result.address
            ));
        }
    }
}

pub fn render_bring_up(report: &BringUpReport, ui: &UiContext) -> String {
    let (ok, failed) = report.push_counts();

    let mut summary = if report.cancelled {
        ResultSummary::failed("Bring-Up Cancelled")
    } else if report.fleet_healthy() {
        ResultSummary::success("Fleet Online")
    } else {
        ResultSummary::partial("Fleet Configured With Issues")
    };

    summary.add_stat("Pushed", format!("{}/{}", ok, ok + failed));
    if !report.cancelled {
        summary.add_stat(
            "Reachable",
            format!("{}/{}", report.summary.reachable_count, report.summary.total),
        );
    }
    summary.add_stat(
        "Session",
        report.session_issued_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    summary.add_stat("Elapsed", format_elapsed(report.elapsed));

    if let Some(err) = &report.registration_error {
        summary.add_warning(format!("monitoring domain not registered: {}", err));
    }
    for outcome in report.outcomes.iter().filter(|o| !o.succeeded) {
        summary.add_warning(format!(
            "{} {}: {}",
            outcome.target.role(),
            outcome.target.address(),
            outcome.error.as_deref().unwrap_or("push failed")
        ));
    }
    add_reachability(&mut summary, &report.summary);

    if failed > 0 && !report.cancelled {
        summary.with_next_step("re-run `fleetup configure` once the failing hosts accept SSH");
    }

    summary.render(ui.color, ui.unicode)
}

pub fn render_verification(reach: &ReachabilitySummary, ui: &UiContext) -> String {
    let mut summary = if reach.all_reachable() {
        ResultSummary::success("Fleet Reachable")
    } else if reach.reachable_count == 0 {
        ResultSummary::failed("Fleet Unreachable")
    } else {
        ResultSummary::partial("Fleet Partially Reachable")
    };
    summary.add_stat(
        "Reachable",
        format!("{}/{}", reach.reachable_count, reach.total),
    );
    add_reachability(&mut summary, reach);
    summary.render(ui.color, ui.unicode)
}

/// Wall-clock report printed at the end of `deploy`
pub fn render_timing(start: DateTime<Local>, end: DateTime<Local>) -> String {
    let elapsed = (end - start).to_std().unwrap_or_default();
    format!(
        "Start Time: {}\nEnd Time: {}\nTotal Elapsed Time: {}",
        start.format("%Y-%m-%d %H:%M:%S"),
        end.format("%Y-%m-%d %H:%M:%S"),
        format_elapsed(elapsed)
    )
}

/// Final NDJSON line for a bring-up
pub fn bring_up_json(command: &str, report: &BringUpReport) -> Value {
    let (ok, failed) = report.push_counts();
    let status = if report.cancelled {
        "cancelled"
    } else if report.fleet_healthy() {
        "success"
    } else {
        "partial"
    };
    json!({
        "event": "complete",
        "command": command,
        "status": status,
        "pushed": ok,
        "push_failed": failed,
        "reachable": report.summary.reachable_count,
        "total": report.summary.total,
        "registration_error": report.registration_error,
        "elapsed_secs": report.elapsed.as_secs_f64(),
    })
}

pub fn verification_json(reach: &ReachabilitySummary) -> Value {
    json!({
        "event": "complete",
        "command": "verify",
        "status": if reach.all_reachable() { "success" } else { "partial" },
        "reachable": reach.reachable_count,
        "total": reach.total,
        "unreachable": reach
            .unreachable()
            .map(|r| r.address.clone())
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::terminal::TerminalCapabilities;
    use chrono::{TimeZone, Utc};
    use fleetup::domain::entities::{Credentials, PushOutcome, VerificationResult};
    use fleetup::Target;

    fn plain() -> UiContext {
        UiContext {
            json: false,
            verbose: 0,
            caps: TerminalCapabilities {
                is_tty: false,
                supports_color: false,
                supports_unicode: false,
                is_ci: false,
                width: 80,
            },
            color: false,
            unicode: false,
        }
    }

    fn result(desc: &str, address: &str, reachable: bool) -> VerificationResult {
        VerificationResult {
            target_description: desc.to_string(),
            address: address.to_string(),
            reachable,
        }
    }

    fn report(failed_push: bool) -> BringUpReport {
        let creds = Credentials::new("azureuser", "/keys/id");
        let mut outcomes = vec![PushOutcome::success(Target::controller(
            "20.1.2.3",
            creds.clone(),
        ))];
        outcomes.push(if failed_push {
            PushOutcome::failure(
                Target::production("10.0.1.5", creds),
                "ssh connection failed: timed out",
            )
        } else {
            PushOutcome::success(Target::production("10.0.1.5", creds))
        });
        BringUpReport {
            session_issued_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            registration_error: None,
            outcomes,
            summary: ReachabilitySummary::from_results(vec![
                result("management endpoint", "10.0.0.1", true),
                result("production host 1", "10.0.1.5", !failed_push),
            ]),
            cancelled: false,
            elapsed: Duration::from_secs(3725),
        }
    }

    #[test]
    fn elapsed_uses_two_digit_fields() {
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "01h 02m 05s");
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00h 00m 00s");
        assert_eq!(format_elapsed(Duration::from_secs(90_000)), "25h 00m 00s");
    }

    #[test]
    fn healthy_report_renders_success() {
        let rendered = render_bring_up(&report(false), &plain());
        assert!(rendered.contains("[OK] Fleet Online"));
        assert!(rendered.contains("2/2"));
        assert!(rendered.contains("01h 02m 05s"));
        assert!(rendered.contains("2026-03-01 12:00:00 UTC"));
        assert!(!rendered.contains("Next:"));
    }

    #[test]
    fn failed_push_is_listed_with_reason() {
        let rendered = render_bring_up(&report(true), &plain());
        assert!(rendered.contains("[WARN] Fleet Configured With Issues"));
        assert!(rendered.contains("production 10.0.1.5: ssh connection failed: timed out"));
        assert!(rendered.contains("production host 1 10.0.1.5 unreachable"));
        assert!(rendered.contains("Next:"));
    }

    #[test]
    fn json_summary_counts_failures() {
        let value = bring_up_json("configure", &report(true));
        assert_eq!(value["status"], "partial");
        assert_eq!(value["pushed"], 1);
        assert_eq!(value["push_failed"], 1);
        assert_eq!(value["reachable"], 1);
        assert_eq!(value["total"], 2);
    }

    #[test]
    fn verification_lists_unreachable_addresses() {
        let reach = ReachabilitySummary::from_results(vec![
            result("controller", "10.0.0.4", true),
            result("tool host", "10.0.0.9", false),
        ]);
        let rendered = render_verification(&reach, &plain());
        assert!(rendered.contains("Fleet Partially Reachable"));
        assert!(rendered.contains("tool host 10.0.0.9 unreachable"));

        let value = verification_json(&reach);
        assert_eq!(value["unreachable"][0], "10.0.0.9");
    }

    #[test]
    fn timing_report_has_three_lines() {
        let start = Local.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let end = Local.with_ymd_and_hms(2026, 3, 1, 9, 42, 7).unwrap();
        let text = render_timing(start, end);
        assert_eq!(
            text,
            "Start Time: 2026-03-01 09:00:00\nEnd Time: 2026-03-01 09:42:07\nTotal Elapsed Time: 00h 42m 07s"
        );
    }
}
