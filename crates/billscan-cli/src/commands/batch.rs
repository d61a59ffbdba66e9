//! Batch processing command for an inbox of text files.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use billscan_core::invoice::{
    aggregate, ExtractionResult, FileStats, HeuristicInvoiceParser, InvoiceParser,
};
use billscan_core::models::invoice::RunResult;

use super::{load_config, read_document};
use crate::report::{render_report, render_review, write_summary, ReportContext};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory holding the `.txt` files to process
    #[arg(default_value = "inbox")]
    inbox: PathBuf,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the JSON to stdout without writing any files, log file included
    #[arg(long)]
    dry_run: bool,

    /// Also write a Markdown report with Plan / Execution / Verification sections
    #[arg(long)]
    report: bool,

    /// Print a concise summary and prompt before writing files
    #[arg(long)]
    review: bool,

    /// Also write a per-file summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,
}

impl BatchArgs {
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

pub async fn run(
    args: BatchArgs,
    config_path: Option<&str>,
    log_file: Option<&Path>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let ran_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut config = load_config(config_path)?;
    if let Some(output_dir) = &args.output_dir {
        config.output.out_dir = output_dir.clone();
    }
    let write_report = args.report || config.output.report;
    let write_csv = args.summary || config.output.summary;

    info!(
        "billscan batch starting (dry_run={}, report={}, review={})",
        args.dry_run, write_report, args.review
    );

    if !args.inbox.is_dir() {
        anyhow::bail!("Inbox directory not found: {}", args.inbox.display());
    }

    let files = discover(&args.inbox)?;
    if files.is_empty() {
        warn!("No .txt files found in {}", args.inbox.display());
    }

    let parser = Arc::new(HeuristicInvoiceParser::from_config(&config.extraction)?);
    let results = extract_all(files, parser, args.jobs).await?;
    let run = aggregate(results);
    let stats: Vec<FileStats> = run.invoices.iter().map(FileStats::from_record).collect();

    info!(
        "Done: {} invoice(s), {} assumption(s), {} question(s)",
        run.invoices.len(),
        run.assumptions.len(),
        run.questions.len()
    );

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&run)?);
        info!("Dry run complete, no files written");
        return Ok(());
    }

    if args.review {
        print!("{}", render_review(&run));
        if !confirm("Write outputs? (y/N): ")? {
            info!("Review aborted, no files written");
            println!("Aborted. No files written.");
            return Ok(());
        }
    }

    let json_path = config.json_path();
    fs::create_dir_all(&config.output.out_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output.out_dir.display()
        )
    })?;

    fs::write(&json_path, serde_json::to_string_pretty(&run)?)?;
    info!("Wrote {}", json_path.display());
    println!("{} Wrote {}", style("✓").green(), json_path.display());

    if write_report {
        let report_path = config.report_path();
        let ctx = ReportContext {
            json_file: &config.output.json_file,
            report_file: &config.output.report_file,
            log_file,
            ran_at: &ran_at,
        };
        fs::write(&report_path, render_report(&run, &stats, &ctx))?;
        info!("Wrote {}", report_path.display());
        println!("{} Wrote {}", style("✓").green(), report_path.display());
    }

    if write_csv {
        let summary_path = config.summary_path();
        write_summary(&summary_path, &stats)?;
        info!("Wrote {}", summary_path.display());
        println!("{} Wrote {}", style("✓").green(), summary_path.display());
    }

    print_totals(&run, start);
    Ok(())
}

/// All `*.txt` files directly inside `inbox`, sorted by path.
fn discover(inbox: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.txt", Pattern::escape(&inbox.to_string_lossy()));

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    debug!("Found {} text files in {}", files.len(), inbox.display());
    Ok(files)
}

/// Parse files on the blocking pool, at most `jobs` at a time.
///
/// Results come back in completion order.
async fn extract_all(
    files: Vec<PathBuf>,
    parser: Arc<HeuristicInvoiceParser>,
    jobs: usize,
) -> anyhow::Result<Vec<ExtractionResult>> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();

    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let parser = parser.clone();

        tasks.spawn_blocking(move || {
            let _permit = permit;
            info!("Processing {}", path.display());
            let document = read_document(&path)?;
            Ok::<_, anyhow::Error>(parser.parse(&document))
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined??);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(results)
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_totals(run: &RunResult, start: Instant) {
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        run.invoices.len(),
        start.elapsed()
    );
    println!(
        "   {} assumption(s), {} question(s)",
        style(run.assumptions.len()).yellow(),
        style(run.questions.len()).yellow()
    );

    if !run.questions.is_empty() {
        println!();
        println!("{}", style("Questions:").yellow());
        for question in &run.questions {
            println!("  ? {}", question);
        }
    }
}
