//! Config command - inspect and initialize the configuration file.

use anyhow::{Context, Result, bail};
use bfore_store::Config;
use clap::{Args, Subcommand};
use tracing::info;

use crate::app::AppContext;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the configuration file path.
    Path,

    /// Write the default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, app: &AppContext) -> Result<()> {
    match &args.action {
        ConfigAction::Show { json } => {
            println!("{}", render_config(&app.config, *json)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", app.config_path.display());
            Ok(())
        }
        ConfigAction::Init { force } => init_config(app, *force),
    }
}

fn render_config(config: &Config, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(config).context("Failed to serialize configuration");
    }
    let lines = [
        "bfore Configuration".to_string(),
        "─".repeat(40),
        format!("API base URL:     {}", config.api.base_url),
        format!("Request timeout:  {}s", config.api.timeout_secs),
        format!("Window width:     {} min", config.sample.window_minutes),
        format!(
            "Max concurrency:  {}",
            match config.sample.max_concurrency {
                0 => "one per window".to_string(),
                n => n.to_string(),
            }
        ),
    ];
    Ok(lines.join("\n"))
}

fn init_config(app: &AppContext, force: bool) -> Result<()> {
    let path = &app.config_path;
    if path.exists() && !force {
        bail!(
            "{} already exists; use --force to overwrite it",
            path.display()
        );
    }
    Config::default()
        .save_to(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Configuration initialized");
    println!(
        "{}",
        app.formatter
            .format_success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
