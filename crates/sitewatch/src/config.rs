//! Flag overrides on top of the shared `sitewatch-config` file.
//!
//! Precedence: defaults, config file, `SITEWATCH_*` environment, then
//! command-line flags.

use clap::ValueEnum;

use sitewatch_config::Config;
use sitewatch_core::ClientConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Load the config file and apply flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = sitewatch_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref endpoint) = global.endpoint {
        cfg.endpoint.clone_from(endpoint);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
}

pub fn client_config(cfg: &Config) -> Result<ClientConfig, CliError> {
    Ok(cfg.to_client_config()?)
}

/// `--output`, else the config default, else table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    match global.output {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(&cfg.output, true).map_err(|_| CliError::Validation {
            field: "output".into(),
            reason: format!("unknown output format '{}'", cfg.output),
        }),
    }
}

/// `--color`, else the config default, else auto.
pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    global
        .color
        .or_else(|| ColorMode::from_str(&cfg.color, true).ok())
        .unwrap_or(ColorMode::Auto)
}
