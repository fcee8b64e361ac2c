#![deny(missing_docs)]

//! # Check Command
//!
//! Parses the backend, then loads and validates every method `config.yaml`.
//! Succeeds only when the whole project would be accepted by provisioning.

use crate::error::CliResult;
use crate::project::ProjectArgs;
use gantry_core::{AppResult, BackendModel, MethodConfig};
use rayon::prelude::*;
use std::io::Write;

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Backend root and parse settings.
    #[clap(flatten)]
    pub project: ProjectArgs,
}

/// Counts reported after a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    /// Number of routes.
    pub routes: usize,
    /// Number of route + method pairs.
    pub methods: usize,
    /// Number of layers.
    pub layers: usize,
    /// Whether a backend-root OpenAPI document was found.
    pub openapi: bool,
}

/// Loads every method config of `model`.
pub fn check_model(model: &BackendModel) -> AppResult<CheckSummary> {
    let configs: Vec<_> = model
        .api
        .routes
        .iter()
        .flat_map(|r| r.methods.iter().map(|m| &m.config_file))
        .collect();

    configs
        .par_iter()
        .map(|path| MethodConfig::load(path).map(|_| ()))
        .collect::<AppResult<Vec<()>>>()?;

    Ok(CheckSummary {
        routes: model.api.routes.len(),
        methods: configs.len(),
        layers: model.layers.len(),
        openapi: model.api.openapi.is_some(),
    })
}

/// Executes the check command.
pub fn execute(args: &CheckArgs, out: &mut impl Write) -> CliResult<()> {
    let model = args.project.load()?;
    let summary = check_model(&model)?;
    writeln!(
        out,
        "ok: {} routes, {} methods, {} layers, openapi: {}",
        summary.routes,
        summary.methods,
        summary.layers,
        if summary.openapi { "yes" } else { "no" }
    )?;
    Ok(())
}
