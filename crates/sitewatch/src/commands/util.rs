//! Shared helpers for command handlers.

use std::io::IsTerminal;

use sitewatch_core::{GraphqlClient, MonitorController, WebsiteId};

use super::Context;
use crate::error::CliError;

/// Load the website list and return the controller for `id`.
pub async fn resolve_monitor(
    ctx: &Context,
    id: &str,
) -> Result<MonitorController<GraphqlClient>, CliError> {
    ctx.dashboard.load().await?;
    ctx.dashboard
        .monitor(&WebsiteId::from(id))
        .ok_or_else(|| CliError::NotFound {
            identifier: id.into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, destructive actions need `--yes`.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
