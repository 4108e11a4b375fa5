// xregscan - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (CLI flags take priority)
// 3. Logging initialisation (debug mode support)
// 4. The extraction run and exit-code mapping

use clap::Parser;
use std::path::PathBuf;
use xregscan::app::run::{self, RunOptions};
use xregscan::core::model::ReportFormat;
use xregscan::platform::config;
use xregscan::platform::fs::{InputSource, OutputSink};
use xregscan::util;

/// xregscan - extract GVM xreg mismatch errors from simulator logs.
///
/// Collects lines containing "GVM error: DUT and REF xreg mismatch",
/// merges repeats that report the same DUT/REF values, and optionally
/// writes a copy of the log with those lines removed.
#[derive(Parser, Debug)]
#[command(name = "xregscan", version, about)]
struct Cli {
    /// Log file to scan, or "-" to read standard input.
    logfile: PathBuf,

    /// Write the unique-entry report here (default: stdout).
    /// An existing file is replaced only once every output has been opened.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Prefix each report line with its occurrence count, e.g. "[3] ...".
    #[arg(short = 'c', long = "counts", overrides_with = "no_counts")]
    counts: bool,

    /// Print report lines without counts, even if config.toml enables them.
    #[arg(long = "no-counts", overrides_with = "counts")]
    no_counts: bool,

    /// Write a copy of the input with all mismatch lines removed.
    #[arg(short = 'F', long = "filtered")]
    filtered: Option<PathBuf>,

    /// Report format.
    #[arg(short = 'f', long = "format", value_parser = ["text", "json", "csv"])]
    format: Option<String>,

    /// Read configuration from this file instead of the platform default.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    /// Explicit counts choice from the command line, if any.
    /// The last of --counts / --no-counts wins.
    fn counts_override(&self) -> Option<bool> {
        match (self.counts, self.no_counts) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config_warnings = Vec::new();
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => {
            let (path, warning) = config::default_config_path();
            config_warnings.extend(warning);
            path
        }
    };
    let (app_config, load_warnings) = config::load_config(&config_path);
    config_warnings.extend(load_warnings);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::debug!(
        path = %config_path.display(),
        found = config_path.exists(),
        "Configuration resolved"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let format = cli
        .format
        .as_deref()
        .and_then(ReportFormat::parse)
        .unwrap_or(app_config.format);

    let options = RunOptions {
        input: InputSource::from_arg(&cli.logfile),
        report: OutputSink::from_arg(cli.output.as_deref()),
        counts: cli.counts_override().unwrap_or(app_config.counts),
        format,
        filtered: cli.filtered,
    };

    tracing::debug!(?options, "Starting extraction");

    match run::run(&options) {
        Ok(_) => std::process::exit(util::constants::EXIT_SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "Extraction failed");
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
