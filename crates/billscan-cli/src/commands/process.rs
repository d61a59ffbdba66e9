//! Process command - extract data from a single text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use billscan_core::invoice::{process_documents, HeuristicInvoiceParser};

use super::{load_config, read_document};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let parser = HeuristicInvoiceParser::from_config(&config.extraction)?;
    let document = read_document(&args.input)?;
    let run = process_documents(&parser, std::slice::from_ref(&document));

    let output = serde_json::to_string_pretty(&run)?;

    if let Some(output_path) = &args.output {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, &output)?;
        println!(
            "{} Wrote {} in {:?}",
            style("✓").green(),
            output_path.display(),
            start.elapsed()
        );
    } else {
        println!("{}", output);
    }

    for question in &run.questions {
        eprintln!("{} {}", style("?").yellow(), question);
    }

    Ok(())
}
