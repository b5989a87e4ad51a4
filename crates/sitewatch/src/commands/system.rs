//! Backend liveness.

use serde::Serialize;

use super::Context;
use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct PingEntry {
    endpoint: String,
    status: u16,
}

/// Plain GET against the service root. Any HTTP answer means awake.
pub async fn ping(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let status = ctx.dashboard.ping_backend().await?;
    let entry = PingEntry {
        endpoint: ctx.dashboard.api().base_url().to_string(),
        status,
    };

    let out = output::render_single(
        ctx.output,
        &entry,
        |e| format!("Backend at {} is awake (HTTP {})", e.endpoint, e.status),
        |e| e.status.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
