//! `sitewatch-tui`: terminal dashboard for website uptime monitoring.
//!
//! Built on [ratatui](https://ratatui.rs) around the `sitewatch-core`
//! [`Dashboard`]: a card per registered website with its live status,
//! start/stop/report/delete commands, and a registration form.
//!
//! Logs are written to a file (default `/tmp/sitewatch-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sitewatch_config::Config;
use sitewatch_core::Dashboard;

use crate::app::App;

/// Terminal dashboard for monitoring website uptime.
#[derive(Parser, Debug)]
#[command(name = "sitewatch-tui", version, about)]
struct Cli {
    /// Backend service root (overrides the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/sitewatch-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(ref endpoint) = self.endpoint {
            cfg.endpoint.clone_from(endpoint);
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout = timeout;
        }
        if self.insecure {
            cfg.insecure = true;
        }
    }
}

/// File-based tracing; stdout/stderr belong to the terminal UI. The
/// returned guard must be held until exit so buffered logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sitewatch_tui={log_level},sitewatch_core={log_level},sitewatch_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("sitewatch-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    // Priority: CLI flags > environment > config file > defaults
    let mut cfg = sitewatch_config::load_config_or_default();
    cli.apply_overrides(&mut cfg);
    info!(endpoint = %cfg.endpoint, "starting sitewatch-tui");

    let client = cfg
        .to_client_config()
        .wrap_err("invalid backend configuration")?
        .build_client()
        .wrap_err("failed to build the backend client")?;

    let mut app = App::new(Dashboard::new(Arc::new(client)));
    app.run().await
}
