#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use gantry_core::{render_report, AppError};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Parse failure from the core library.
    #[display("{}", _0)]
    App(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// JSON output failure.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// YAML output failure.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// Logging could not be installed.
    #[display("Logging setup failed: {}", _0)]
    Logging(String),
}

impl CliError {
    /// Text printed to stderr before the process exits.
    pub fn report(&self) -> String {
        match self {
            CliError::App(err) => render_report(err),
            other => format!("error: {}", other),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Yaml(e) => Some(e),
            CliError::Logging(_) => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_errors_use_core_report() {
        let err = CliError::from(AppError::EmptyApiFolder {
            path: PathBuf::from("/srv/api"),
        });
        let report = err.report();
        assert!(report.starts_with("error[EmptyApiFolder]"), "{report}");
        assert!(report.contains("/srv/api"));
    }

    #[test]
    fn test_other_errors_use_display() {
        let err = CliError::Logging("already set".to_string());
        assert_eq!(err.report(), "error: Logging setup failed: already set");
    }
}
