#![deny(missing_docs)]

//! # Gantry CLI
//!
//! Command Line Interface for the serverless backend directory parser.
//!
//! Supported Commands:
//! - `parse`: Prints the parsed backend model as JSON or YAML.
//! - `routes`: Prints the route table.
//! - `check`: Parses the backend and validates every method config.

use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;

use crate::error::CliResult;
use crate::logging::LogFormat;

mod check;
mod error;
mod logging;
mod parse;
mod project;
mod routes;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Serverless backend directory parser")]
struct Cli {
    /// Log at debug level unless GANTRY_LOG or RUST_LOG says otherwise.
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Log line format.
    #[clap(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the parsed backend model.
    Parse(parse::ParseArgs),
    /// Print one `METHOD /route -> handler` line per method.
    Routes(routes::RoutesArgs),
    /// Parse the backend and validate every method config.
    Check(check::CheckArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    logging::init(cli.verbose, cli.log_format)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Parse(args) => parse::execute(args, &mut out),
        Commands::Routes(args) => routes::execute(args, &mut out),
        Commands::Check(args) => check::execute(args, &mut out),
    }
}

fn main() -> ExitCode {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.report());
            ExitCode::FAILURE
        }
    }
}
