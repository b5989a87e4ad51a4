//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod monitor;
pub mod report;
pub mod system;
pub mod util;
pub mod websites;

use sitewatch_core::{Dashboard, GraphqlClient};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a backend-bound handler needs.
pub struct Context {
    pub dashboard: Dashboard<GraphqlClient>,
    pub output: OutputFormat,
    pub color: bool,
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::List => websites::list(ctx, global).await,
        Command::Add(args) => websites::add(ctx, args, global).await,
        Command::Delete(args) => websites::delete(ctx, args, global).await,
        Command::Start(args) => monitor::start(ctx, args, global).await,
        Command::Stop(args) => monitor::stop(ctx, args, global).await,
        Command::Check(args) => monitor::check(ctx, args, global).await,
        Command::Report(args) => report::handle(ctx, args, global).await,
        Command::Ping => system::ping(ctx, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled without a backend".into(),
        )),
    }
}
