#![deny(missing_docs)]

//! # Logging
//!
//! Installs the `tracing` subscriber for the `gantry` binary.
//!
//! The filter comes from `GANTRY_LOG`, then `RUST_LOG`, then the default level
//! picked by `--verbose`.

use crate::error::{CliError, CliResult};
use std::env;
use tracing_subscriber::EnvFilter;

/// Output format of log lines on stderr.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Picks the filter directive.
fn filter_directive(verbose: bool) -> String {
    env::var("GANTRY_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default_level(verbose).to_string())
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber, writing to stderr so command output on
/// stdout stays machine-readable.
pub fn init(verbose: bool, format: LogFormat) -> CliResult<()> {
    let filter = EnvFilter::try_new(filter_directive(verbose))
        .or_else(|_| EnvFilter::try_new(default_level(verbose)))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::Logging(e.to_string()))
}
