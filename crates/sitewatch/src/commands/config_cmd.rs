//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;
use serde::Serialize;

use sitewatch_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

#[derive(Serialize)]
struct ShowEntry<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a Config,
}

fn detail(e: &ShowEntry<'_>) -> String {
    let c = e.config;
    [
        format!("Config file:  {}", e.path),
        format!("Endpoint:     {}", c.endpoint),
        format!("GraphQL path: {}", c.graphql_path),
        format!("Timeout:      {}s", c.timeout),
        format!("Insecure:     {}", c.insecure),
        format!(
            "CA cert:      {}",
            c.ca_cert
                .as_ref()
                .map_or_else(|| "-".into(), |p| p.display().to_string())
        ),
        format!("Output:       {}", c.output),
        format!("Color:        {}", c.color),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force, path } => {
            let path = path.unwrap_or_else(sitewatch_config::config_path);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            config::apply_overrides(&mut cfg, global);

            let interactive = !global.yes && std::io::stdin().is_terminal();
            if global.endpoint.is_none() && interactive {
                cfg.endpoint = Input::new()
                    .with_prompt("Backend URL")
                    .default(cfg.endpoint.clone())
                    .interact_text()
                    .map_err(prompt_err)?;
            }

            // Validate before anything touches the disk.
            cfg.to_client_config()?;
            sitewatch_config::save_config_to(&cfg, &path)?;
            output::notice(&format!("Config written to {}", path.display()), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let entry = ShowEntry {
                path: sitewatch_config::config_path().display().to_string(),
                config: &cfg,
            };
            let out = output::render_single(
                config::output_format(global, &cfg)?,
                &entry,
                detail,
                |e| e.config.endpoint.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &sitewatch_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}
