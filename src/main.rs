//! grainpipe CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: set up logging once,
//! parse args, dispatch the command, and exit with its status.
//! For programmatic use, prefer the library API (`grainpipe::api`).

use std::process::ExitCode;

use clap::Parser;
use grainpipe::logging::{LoggingConfig, setup_logging};

mod cli;

fn main() -> ExitCode {
    let logging = setup_logging(&LoggingConfig::default().with_env());
    let args = cli::CliArgs::parse();
    cli::run(args, logging).into()
}
