//! Light Report: HTML report generator CLI

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use light_report::config::{load_config, CliOverrides};
use light_report::reporter::ConsoleReporter;
use light_report::ReportError;
use std::path::PathBuf;
use std::process::ExitCode;

/// Render light_test results as a static HTML page
#[derive(Parser, Debug)]
#[command(name = "light-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Results file written by the test harness (default: tests/results.json)
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Directory searched for test sources (default: tests)
    #[arg(long, value_name = "DIR")]
    source_root: Option<PathBuf>,

    /// Extension of test source files (default: cppm)
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Report destination, overwritten if present (default: tests/results.html)
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to config file (default: search .light-report.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            let code = e
                .downcast_ref::<ReportError>()
                .map(ReportError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let work_dir = std::env::current_dir().context("Cannot determine working directory")?;
    let cli = CliOverrides {
        results_path: args.results,
        source_root: args.source_root,
        source_extension: args.extension,
        output_path: args.output,
    };
    let config = load_config(&work_dir, args.config.as_deref(), cli)?;

    if args.verbose && !args.quiet {
        eprintln!(
            "{}: Reading {} (sources: {}/**/*.{})",
            "Info".blue(),
            config.results_path.display(),
            config.source_root.display(),
            config.source_extension
        );
    }

    let summary = light_report::run(&config)?;

    if !args.quiet {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report(&summary);
    }

    Ok(())
}
