#![deny(missing_docs)]

//! # Project Arguments
//!
//! Arguments shared by every command that reads a backend root.

use crate::error::CliResult;
use gantry_core::{parse_backend_with, BackendModel, ParseOptions};
use std::path::PathBuf;

/// Backend root and parse settings.
#[derive(clap::Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Backend root holding `api/`, `layers/` and `openapi.yaml`.
    #[clap(env = "GANTRY_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Reject directories that hold a handler but are not named after an HTTP method.
    #[clap(long)]
    pub strict: bool,
}

impl ProjectArgs {
    /// Parse settings derived from the flags.
    pub fn options(&self) -> ParseOptions {
        ParseOptions::new().strict_methods(self.strict)
    }

    /// Parses the backend at `root`.
    pub fn load(&self) -> CliResult<BackendModel> {
        tracing::debug!(root = %self.root.display(), strict = self.strict, "parsing backend");
        Ok(parse_backend_with(&self.root, &self.options())?)
    }
}
