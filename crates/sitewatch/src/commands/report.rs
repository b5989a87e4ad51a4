//! Uptime/downtime report.

use sitewatch_core::{ReportSummary, WebsiteApi, WebsiteId};

use super::Context;
use crate::cli::{GlobalOpts, WebsiteArgs};
use crate::error::CliError;
use crate::output;

const BAR_WIDTH: usize = 40;

/// Horizontal bar scaled against `total`.
fn bar(count: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    let filled = (count * BAR_WIDTH).div_ceil(total).min(BAR_WIDTH);
    "█".repeat(filled)
}

fn detail(summary: &ReportSummary) -> String {
    let total = summary.total();
    let mut lines = vec![summary.title(), String::new()];
    for (label, count) in summary.counters() {
        lines.push(format!("{label:<9} {count:>6}  {}", bar(count, total)));
    }
    if let Some(ratio) = summary.uptime_ratio() {
        lines.push(String::new());
        lines.push(format!("Availability: {:.1}%", ratio * 100.0));
    }
    lines.join("\n")
}

pub async fn handle(ctx: &Context, args: WebsiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let id = WebsiteId::from(args.id);
    let report = WebsiteApi::get_report(ctx.dashboard.api().as_ref(), &id).await?;
    let summary = ReportSummary::from_report(&report);

    let out = output::render_single(ctx.output, &summary, detail, |s| {
        format!("{} {}", s.uptime, s.downtime)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
