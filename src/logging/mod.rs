//! Process-wide logging.
//!
//! [`setup_logging`] installs the global `tracing` subscriber once per
//! process and hands back a [`LoggingHandle`]. The console layer and its
//! filter sit behind reload handles, so a command can swap presentation
//! (timestamps, paths, level floor) by passing a new [`LoggingConfig`] to
//! [`LoggingHandle::apply`] instead of mutating handlers in place.
//! [`configure_for_command`] computes that config.
//!
//! A [`LogCapture`] sits above the filter, so [`LoggingHandle::capture`]
//! holds the recent events that actually reached the console.
pub mod capture;
pub mod config;

pub use capture::{LogCapture, LogEntry};
pub use config::{ConsoleConfig, ConsoleTarget, LOG_ENV, LoggingConfig, configure_for_command};

use std::sync::Mutex;

use once_cell::sync::OnceCell;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry, fmt, reload};

use crate::error::{Error, Result};
use crate::types::LogFormat;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type ConsoleLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

static LOGGING: OnceCell<LoggingHandle> = OnceCell::new();

/// Handle to the installed subscriber.
pub struct LoggingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    console: reload::Handle<ConsoleLayer, FilteredRegistry>,
    capture: LogCapture,
    current: Mutex<LoggingConfig>,
    installed: bool,
}

impl std::fmt::Debug for LoggingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingHandle")
            .field("current", &self.current())
            .field("installed", &self.installed)
            .finish_non_exhaustive()
    }
}

/// Installs the global subscriber on first call; later calls return the
/// same handle and ignore `config`.
pub fn setup_logging(config: &LoggingConfig) -> &'static LoggingHandle {
    LOGGING.get_or_init(|| {
        let (filter, filter_handle) = reload::Layer::new(build_filter(config));
        let (console, console_handle) = reload::Layer::new(build_console_layer(config));
        let capture = LogCapture::new();

        let subscriber = Registry::default()
            .with(filter)
            .with(console)
            .with(capture.clone());
        // Fails only if something else already owns the global default,
        // e.g. a test harness. The handle then drives a detached subscriber.
        let installed = tracing::subscriber::set_global_default(subscriber).is_ok();

        LoggingHandle {
            filter: filter_handle,
            console: console_handle,
            capture,
            current: Mutex::new(config.clone()),
            installed,
        }
    })
}

impl LoggingHandle {
    /// Reconfigures the console layer and its filter.
    pub fn apply(&self, config: &LoggingConfig) -> Result<()> {
        if self.installed {
            self.reload(config)?;
        }

        match self.current.lock() {
            Ok(mut current) => *current = config.clone(),
            Err(poisoned) => *poisoned.into_inner() = config.clone(),
        }
        tracing::debug!(?config, "Logging reconfigured");
        Ok(())
    }

    fn reload(&self, config: &LoggingConfig) -> Result<()> {
        self.filter
            .reload(build_filter(config))
            .map_err(Error::unexpected)?;
        self.console
            .reload(build_console_layer(config))
            .map_err(Error::unexpected)
    }

    /// The config most recently applied.
    pub fn current(&self) -> LoggingConfig {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Recent events that passed the live filter.
    pub fn capture(&self) -> &LogCapture {
        &self.capture
    }

    /// Whether this handle's subscriber is the process-wide default.
    pub fn is_installed(&self) -> bool {
        self.installed
    }
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if !config.console.enabled {
        return EnvFilter::new("off");
    }
    let default = LevelFilter::from_level(config.console.min_level);
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(config.directives.as_deref().unwrap_or(""))
}

fn build_console_layer(config: &LoggingConfig) -> ConsoleLayer {
    let console = &config.console;
    let writer = match console.target {
        ConsoleTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        ConsoleTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_file(console.show_path)
        .with_line_number(console.show_path)
        .with_target(console.show_path);

    match (config.format, console.show_time) {
        (LogFormat::Pretty, true) => layer.boxed(),
        (LogFormat::Pretty, false) => layer.without_time().boxed(),
        (LogFormat::Json, true) => layer.json().boxed(),
        (LogFormat::Json, false) => layer.json().without_time().boxed(),
    }
}
