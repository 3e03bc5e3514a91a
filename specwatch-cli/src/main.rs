//! specwatch: audit analytics beacons in a network capture against a
//! markdown tracking spec.
//!
//! Usage:
//!   specwatch validate capture.har --spec specs --mapping acme_news
//!   specwatch spec --spec specs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use specwatch_capture::HarFile;
use specwatch_cli::{render, select_mapping, CliConfig, OutputFormat, DEFAULT_CONFIG_FILE};
use specwatch_spec::Spec;
use specwatch_validator::ValidationEngine;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "specwatch")]
#[command(version)]
#[command(about = "Validate analytics beacons in a HAR capture against a tracking spec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file with default spec dir, mapping and format
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every beacon in a HAR capture
    Validate {
        /// HAR 1.2 capture file
        capture: PathBuf,

        /// Spec directory (events/, mappings/, packages/, _global/)
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Property mapping to validate against
        #[arg(short, long)]
        mapping: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Exit non-zero if any matched beacon failed
        #[arg(long)]
        strict: bool,
    },

    /// Summarize the catalogs in a spec directory
    Spec {
        /// Spec directory
        #[arg(short, long)]
        spec: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CliConfig::load_from(&cli.config);
    let result = match cli.command {
        Commands::Validate {
            capture,
            spec,
            mapping,
            format,
            strict,
        } => cmd_validate(config.merge_flags(spec, mapping, format), &capture, strict),
        Commands::Spec { spec } => cmd_spec(config.merge_flags(spec, None, None)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins
/// over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_spec(config: &CliConfig) -> Result<Spec> {
    Spec::load(&config.spec_dir)
        .with_context(|| format!("loading spec from {}", config.spec_dir.display()))
}

fn cmd_validate(config: CliConfig, capture: &Path, strict: bool) -> Result<ExitCode> {
    let spec = load_spec(&config)?;
    let mapping = select_mapping(&spec, config.mapping.as_deref())?;

    let report = ValidationEngine::new(&spec, mapping)
        .validate_source(&HarFile::new(capture))
        .with_context(|| format!("validating {}", capture.display()))?;
    info!(
        entries = report.total_entries,
        beacons = report.total_calls,
        failed = report.failed,
        "Report ready"
    );

    let mut stdout = io::stdout().lock();
    render::write_report(&report, config.format, &mut stdout).context("writing report")?;
    stdout.flush().context("writing report")?;

    if strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_spec(config: CliConfig) -> Result<ExitCode> {
    let spec = load_spec(&config)?;
    let mut stdout = io::stdout().lock();
    render::terminal::write_spec_summary(&spec, &mut stdout).context("writing summary")?;
    Ok(ExitCode::SUCCESS)
}
