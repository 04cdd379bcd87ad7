//! tsreport CLI - Timesheet Report Generator
//!
//! Converts a raw timesheet export (CSV or spreadsheet) into a monthly Excel
//! report with a summary sheet and one sheet per employee.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tsreport_core::{Renderer, ReportConfig};
use tsreport_engine::ReportEngine;
use tsreport_render::{pipeline, spawn_conversion, TextRenderer};

#[derive(Parser)]
#[command(name = "tsreport")]
#[command(author, version, about = "Timesheet report generator", long_about = None)]
struct Cli {
    /// Timesheet export (csv, xlsx, xlsm, xls, ods)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output workbook path
    #[arg(short, long, env = "TSREPORT_OUTPUT")]
    output: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the summary instead of writing a workbook
    #[arg(long)]
    summary: bool,

    /// Summary output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: SummaryFormat,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(output) = &cli.output {
        config = config.output(output);
    }

    let table = tsreport_parser::read_file(&cli.file)?;

    if cli.summary {
        return print_summary(table, &config, cli.format);
    }
    generate(table, config)
}

fn print_summary(mut table: tsreport_core::SourceTable, config: &ReportConfig, format: SummaryFormat) -> Result<()> {
    let report = ReportEngine::new(config.clone())
        .build(&mut table)
        .context("Report generation failed!")?;

    match format {
        SummaryFormat::Text => print!("{}", TextRenderer.render(&report)?),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&report.summary)?),
    }
    Ok(())
}

fn generate(table: tsreport_core::SourceTable, config: ReportConfig) -> Result<()> {
    let output = config.output.clone();
    clean_previous(&output)?;

    println!("Generating report..");
    let rx = spawn_conversion(table, config)?;
    let bytes = pipeline::wait(&rx).context("Report generation failed!")?;
    if bytes.is_empty() {
        bail!("Report generation failed!");
    }

    std::fs::write(&output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Successfully generated time sheet report - {}", output.display());
    Ok(())
}

/// Remove the output of a previous run so a failed run leaves no stale report
fn clean_previous(output: &Path) -> Result<()> {
    if output.exists() {
        println!("Cleaning previous data..");
        std::fs::remove_file(output).with_context(|| format!("Failed to remove {}", output.display()))?;
    }
    Ok(())
}
