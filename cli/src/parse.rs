#![deny(missing_docs)]

//! # Parse Command
//!
//! Prints the full backend model as JSON or YAML.

use crate::error::CliResult;
use crate::project::ProjectArgs;
use gantry_core::BackendModel;
use std::io::Write;

/// Serialization used for the printed model.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the parse command.
#[derive(clap::Args, Debug, Clone)]
pub struct ParseArgs {
    /// Backend root and parse settings.
    #[clap(flatten)]
    pub project: ProjectArgs,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Renders a model in the requested format.
pub fn render(model: &BackendModel, format: OutputFormat) -> CliResult<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(model)?,
        OutputFormat::Yaml => serde_yaml::to_string(model)?,
    })
}

/// Executes the parse command, writing the model to `out`.
pub fn execute(args: &ParseArgs, out: &mut impl Write) -> CliResult<()> {
    let model = args.project.load()?;
    let text = render(&model, args.format)?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}
