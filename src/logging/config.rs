use serde::Serialize;
use tracing::Level;

use crate::core::settings::LoggingSettings;
use crate::types::{CommandMode, LogFormat};

/// Environment variable holding `EnvFilter` directives for the console.
pub const LOG_ENV: &str = "GRAINPIPE_LOG";

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// Presentation settings for the console handler
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub target: ConsoleTarget,
    pub show_time: bool,
    /// Source file, line and target of each event
    pub show_path: bool,
    #[serde(serialize_with = "serialize_level")]
    pub min_level: Level,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target: ConsoleTarget::Stderr,
            show_time: true,
            show_path: true,
            min_level: Level::INFO,
        }
    }
}

/// Process-wide logging configuration.
///
/// Values of this type are plain data. Nothing changes until the config is
/// handed to [`super::LoggingHandle::apply`].
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct LoggingConfig {
    pub console: ConsoleConfig,
    pub format: LogFormat,
    /// Extra `EnvFilter` directives; when set they replace `min_level`.
    pub directives: Option<String>,
}

impl LoggingConfig {
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self {
            console: ConsoleConfig {
                min_level: settings.level.into(),
                ..ConsoleConfig::default()
            },
            format: settings.format,
            directives: None,
        }
    }

    /// Picks up directives from [`LOG_ENV`] if it is set and non-empty.
    pub fn with_env(mut self) -> Self {
        self.directives = std::env::var(LOG_ENV)
            .ok()
            .filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.console.min_level = level;
        self
    }
}

/// Derives the logging config a command runs under.
///
/// `Process` keeps the console quiet: stderr only, no timestamps, no source
/// paths, WARN and above. Other commands keep `config` as is.
pub fn configure_for_command(config: &LoggingConfig, mode: CommandMode) -> LoggingConfig {
    let mut next = config.clone();
    match mode {
        CommandMode::Process => {
            next.console.target = ConsoleTarget::Stderr;
            next.console.show_time = false;
            next.console.show_path = false;
            next.console.min_level = Level::WARN;
            next.directives = None;
        }
        CommandMode::ShowConfig => {}
    }
    next
}

fn serialize_level<S: serde::Serializer>(level: &Level, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(level.as_str())
}
