//! Command-line interface components.

use crate::config::ReaderConfig;
use crate::constants::{ENV_FILE_PATH, ENV_WORKERS, LOG_TARGET, PROGRESS_TICK_MS};
use crate::reader::LoadSummary;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "csv-record-reader")]
#[command(about = "Load account records from a delimited file using a pool of worker threads")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Delimited file whose first line names the columns
    #[arg(value_name = "FILE", env = ENV_FILE_PATH)]
    pub file: PathBuf,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(short, long, env = ENV_WORKERS)]
    pub workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the load summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Show a spinner counting processed lines
    #[arg(long)]
    pub progress: bool,
}

impl Args {
    /// Build reader configuration from the arguments
    pub fn to_config(&self) -> ReaderConfig {
        let config = ReaderConfig::new(self.file.clone());
        match self.workers {
            Some(workers) => config.with_workers(workers),
            None => config,
        }
    }

    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    // RUST_LOG wins over the verbosity flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    // stdout is reserved for the summary
    if args.quiet {
        // Compact lines, no timer
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        // Uptime timer; module targets shown with --verbose
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(args.verbose)
                    .with_level(true)
                    .with_thread_names(args.verbose)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Spinner that counts terminal outcomes as they arrive
pub fn create_progress_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} lines processed")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
    spinner
}

/// Print the load summary, either as JSON or as a colored report
pub fn print_summary(summary: &LoadSummary, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("\n{}", "Load Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Lines processed:".bright_cyan(),
        summary.total_lines.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records loaded:".bright_cyan(),
        summary.records_loaded.to_string().bright_white().bold()
    );
    if summary.lines_failed > 0 {
        println!(
            "  {} {}",
            "Lines failed:".bright_red(),
            summary.lines_failed.to_string().bright_red().bold()
        );
    }
    if summary.fatal_errors > 0 {
        println!(
            "  {} {}",
            "File errors:".bright_red(),
            summary.fatal_errors.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {:.1}%",
        "Success rate:".bright_cyan(),
        summary.success_rate()
    );

    Ok(())
}
