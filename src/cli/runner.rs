use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, error, info};

use grainpipe::error::is_pipeline_exception;
use grainpipe::logging::{LoggingConfig, LoggingHandle, configure_for_command};
use grainpipe::{CommandMode, Processor, Settings, build_processor};

use super::args::{CliArgs, Command, DEFAULT_CONFIG};
use super::errors::AppError;

/// How a command ended, as seen by the shell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Exit {
    Success,
    /// One of the pipeline failure kinds
    PipelineFailure,
    /// Anything outside the pipeline taxonomy
    Unexpected,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::PipelineFailure => 1,
            Exit::Unexpected => 2,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}

pub fn run(args: CliArgs, logging: &LoggingHandle) -> Exit {
    run_with(args, logging, build_processor)
}

/// Runs a command with a caller-supplied processor factory.
pub fn run_with<F, P>(args: CliArgs, logging: &LoggingHandle, make_processor: F) -> Exit
where
    F: FnOnce(&Settings) -> grainpipe::Result<P>,
    P: Processor,
{
    match dispatch(args, logging, make_processor) {
        Ok(()) => Exit::Success,
        Err(e) => report_failure(&e),
    }
}

fn dispatch<F, P>(args: CliArgs, logging: &LoggingHandle, make_processor: F) -> Result<(), AppError>
where
    F: FnOnce(&Settings) -> grainpipe::Result<P>,
    P: Processor,
{
    let settings = load_settings(args.config.as_deref())?;

    let mut base = LoggingConfig::from_settings(&settings.logging).with_env();
    if let Some(level) = args.log_level {
        base = base.with_min_level(level.into());
    }

    match args.command {
        Command::Process => {
            logging.apply(&configure_for_command(&base, CommandMode::Process))?;

            let mut processor = make_processor(&settings)?;
            let report = processor.process()?;

            info!(%report, "Process command finished");
            println!("{report}");
        }
        Command::ShowConfig { json } => {
            logging.apply(&configure_for_command(&base, CommandMode::ShowConfig))?;
            println!("{}", render_settings(&settings, json)?);
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings, AppError> {
    match path {
        Some(p) if !p.exists() => Err(AppError::ConfigNotFound {
            path: p.display().to_string(),
        }),
        Some(p) => Ok(Settings::load(p)?),
        None => {
            debug!(default = DEFAULT_CONFIG, "No --config given");
            Ok(Settings::load_or_default(DEFAULT_CONFIG)?)
        }
    }
}

fn render_settings(settings: &Settings, json: bool) -> Result<String, AppError> {
    let rendered = if json {
        serde_json::to_string_pretty(settings).map_err(grainpipe::Error::from)?
    } else {
        toml::to_string_pretty(settings).map_err(grainpipe::Error::unexpected)?
    };
    Ok(rendered)
}

fn report_failure(err: &AppError) -> Exit {
    let exit = if is_pipeline_exception(err) {
        Exit::PipelineFailure
    } else {
        Exit::Unexpected
    };

    error!(error_type = err.error_type(), exit_code = exit.code(), "{err}");
    eprintln!("error: {err}");
    exit
}
