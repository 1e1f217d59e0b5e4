use std::path::PathBuf;

use clap::{Parser, Subcommand};

use grainpipe::LogLevelArg;

/// Settings file used when `--config` is not given. Absent means defaults.
pub const DEFAULT_CONFIG: &str = "grainpipe.toml";

#[derive(Parser, Debug)]
#[command(name = "grainpipe", version, about = "Grain validation pipeline CLI")]
pub struct CliArgs {
    /// Settings file (TOML). Defaults to ./grainpipe.toml if present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Console log level; `process` always raises it to warn
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevelArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate, threshold and audit the configured grain file
    Process,

    /// Print the resolved settings
    ShowConfig {
        /// Print JSON instead of TOML
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
