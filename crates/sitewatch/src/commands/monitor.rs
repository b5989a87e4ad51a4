//! Monitoring commands: start, stop and on-demand status checks.
//!
//! `start` and `stop` go through the website's `MonitorController`, so the
//! same transition rules apply as on the dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sitewatch_core::{DisplayState, WebsiteApi, WebsiteId};

use super::{Context, util};
use crate::cli::{GlobalOpts, WebsiteArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct StateEntry {
    id: WebsiteId,
    url: String,
    state: DisplayState,
}

#[derive(Serialize)]
struct CheckEntry {
    id: WebsiteId,
    status_code: i32,
    state: DisplayState,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
}

fn state_detail(e: &StateEntry, color: bool) -> String {
    format!(
        "{}  {}\n{}",
        e.url,
        output::paint_state(e.state, color),
        e.state.description()
    )
}

fn check_detail(e: &CheckEntry, color: bool) -> String {
    let mut lines = vec![
        format!("ID:     {}", e.id),
        format!("Status: {}", e.status_code),
        format!("State:  {}", output::paint_state(e.state, color)),
    ];
    if let Some(ts) = e.timestamp {
        lines.push(format!("Time:   {}", ts.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    lines.join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn start(ctx: &Context, args: WebsiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = util::resolve_monitor(ctx, &args.id).await?;
    let state = monitor.start_monitoring().await?;
    output::notice("Monitoring started", global.quiet);

    let entry = StateEntry {
        id: monitor.id().clone(),
        url: monitor.website().url.clone(),
        state,
    };
    let out = output::render_single(
        ctx.output,
        &entry,
        |e| state_detail(e, ctx.color),
        |e| e.state.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn stop(ctx: &Context, args: WebsiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = util::resolve_monitor(ctx, &args.id).await?;
    monitor.stop_monitoring().await?;
    output::notice(
        &format!("Monitoring stopped: {}", monitor.website().display_name()),
        global.quiet,
    );
    Ok(())
}

/// One immediate `checkStatus`. Works whether or not the site is monitored.
pub async fn check(ctx: &Context, args: WebsiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let id = WebsiteId::from(args.id);
    let sample = WebsiteApi::check_status(ctx.dashboard.api().as_ref(), &id).await?;

    let entry = CheckEntry {
        id,
        status_code: sample.status_code,
        state: sample.display_state(),
        timestamp: sample.timestamp,
    };
    let out = output::render_single(
        ctx.output,
        &entry,
        |e| check_detail(e, ctx.color),
        |e| e.status_code.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn check_detail_shows_code_state_and_time() {
        let entry = CheckEntry {
            id: WebsiteId::from("w1"),
            status_code: 502,
            state: DisplayState::Down,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).single(),
        };
        let text = check_detail(&entry, false);

        assert!(text.contains("Status: 502"));
        assert!(text.contains("State:  down"));
        assert!(text.contains("Time:   2024-03-01 12:30:00 UTC"));
    }

    #[test]
    fn state_detail_includes_description() {
        let entry = StateEntry {
            id: WebsiteId::from("w1"),
            url: "https://example.com".into(),
            state: DisplayState::Down,
        };
        assert_eq!(
            state_detail(&entry, false),
            "https://example.com  down\nThis website is currently down."
        );
    }
}
