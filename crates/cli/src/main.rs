//! # sheetsift-cli
//!
//! Command-line interface for the sheetsift batch.

mod config;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use config::Config;
use sheetsift_core::{run_batch, BatchReport, JobError};
use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// sheetsift - Convert ranking workbooks and statistics exports to JSON
#[derive(Parser)]
#[command(name = "sheetsift")]
#[command(author, version, about = "Spreadsheet to JSON batch converter", long_about = None)]
struct Cli {
    /// YAML batch configuration (defaults to the built-in batch)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory relative input paths are resolved against
    #[arg(short, long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Directory relative output paths are resolved against
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(cli.input_dir, cli.output_dir);

    tracing::info!(
        jobs = config.jobs.len(),
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        "starting batch"
    );
    let report = run_batch(&config.jobs, &config.layout());
    print_summary(&report);

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print one line per job, then the totals.
fn print_summary(report: &BatchReport) {
    for job in &report.reports {
        match &job.outcome {
            Ok(summary) => {
                println!(
                    "{} {} ({} records)",
                    "ok".green().bold(),
                    summary.output.display(),
                    summary.records
                );
                for skipped in &summary.skipped_inputs {
                    println!("   {} {}", "skipped".yellow(), skipped.display());
                }
            }
            Err(err) => println!("{} {}: {}", "failed".red().bold(), job.label, describe(err)),
        }
    }

    let failed = report.failed().count();
    let total = report.reports.len();
    let line = format!("{} of {total} jobs succeeded", total - failed);
    if failed == 0 {
        println!("{}", line.green());
    } else {
        println!("{}", line.red());
    }
}

/// Error message with its source chain.
fn describe(err: &JobError) -> String {
    let mut text = err.to_string();
    let mut source = err.source().and_then(|s| s.source());
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
