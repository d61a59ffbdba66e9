//! `billscan config`: inspect, create and check the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use tracing::info;

use billscan_core::invoice::HeuristicInvoiceParser;
use billscan_core::models::config::BillscanConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as JSON
    Show,

    /// Write a configuration file holding the defaults
    Init {
        /// Write here instead of the --config or default location
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print where the configuration file is looked up
    Path,

    /// Load the configuration and compile its vendor patterns
    Validate,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let location = config_path.map_or_else(default_config_path, PathBuf::from);

    match args.command {
        ConfigCommand::Show => {
            let config = load_or_default(&location)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { output, force } => {
            write_defaults(output.as_deref().unwrap_or(&location), force)?;
        }
        ConfigCommand::Path => {
            let status = if location.exists() {
                style("exists").green()
            } else {
                style("not created, run 'billscan config init'").yellow()
            };
            println!("{} ({})", location.display(), status);
        }
        ConfigCommand::Validate => validate(&location)?,
    }

    Ok(())
}

fn load_or_default(location: &Path) -> anyhow::Result<BillscanConfig> {
    if !location.exists() {
        eprintln!(
            "{} {} not found, using built-in defaults",
            style("ℹ").blue(),
            location.display()
        );
        return Ok(BillscanConfig::default());
    }
    BillscanConfig::from_file(location)
        .with_context(|| format!("Failed to load config from {}", location.display()))
}

fn write_defaults(target: &Path, force: bool) -> anyhow::Result<()> {
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to replace it.",
            target.display()
        );
    }
    if let Some(dir) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    BillscanConfig::default().save(target)?;
    info!("Wrote default configuration to {}", target.display());
    println!("{} Wrote {}", style("✓").green(), target.display());
    Ok(())
}

fn validate(location: &Path) -> anyhow::Result<()> {
    if !location.exists() {
        anyhow::bail!("Config file not found: {}", location.display());
    }
    let config = BillscanConfig::from_file(location)
        .with_context(|| format!("Failed to load config from {}", location.display()))?;
    HeuristicInvoiceParser::from_config(&config.extraction)
        .with_context(|| format!("Invalid vendor pattern in {}", location.display()))?;

    println!(
        "{} {} is valid ({} extra vendor(s), excerpt of {} chars)",
        style("✓").green(),
        location.display(),
        config.extraction.extra_vendors.len(),
        config.extraction.excerpt_len
    );
    Ok(())
}
