//! Clap derive structures for the `sitewatch` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sitewatch -- website uptime monitoring from the command line
#[derive(Debug, Parser)]
#[command(
    name = "sitewatch",
    version,
    about = "Watch website uptime from the command line",
    long_about = "Watch website uptime from the command line.\n\n\
        Register websites with a downtime-alert backend, start and stop\n\
        monitoring, check their status and read uptime reports.\n\n\
        Every command is a single request against the backend; use\n\
        sitewatch-tui for a live dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

/// Flags left unset fall back to the config file and `SITEWATCH_*`
/// environment variables.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend service root (overrides config)
    #[arg(long, short = 'e', global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered websites
    #[command(alias = "ls")]
    List,

    /// Register a new website
    Add(AddArgs),

    /// Delete a website
    #[command(alias = "rm")]
    Delete(WebsiteArgs),

    /// Start monitoring a website
    Start(WebsiteArgs),

    /// Stop monitoring a website
    Stop(WebsiteArgs),

    /// Run a status check against a website now
    Check(WebsiteArgs),

    /// Show the uptime/downtime report for a website
    Report(WebsiteArgs),

    /// Check that the backend is awake
    Ping,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Website commands ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WebsiteArgs {
    /// Website ID (see `sitewatch list`)
    pub id: String,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Website URL
    pub url: String,

    /// Display title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Address to notify on downtime
    #[arg(long)]
    pub email: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Write to this path instead of the default location
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
