use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::types::{LogFormat, LogLevelArg};

/// Settings consumed by the processor, loaded from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineSettings,
    pub threshold: ThresholdSettings,
    pub audit: AuditSettings,
    pub logging: LoggingSettings,
    /// Directory of the file these settings were loaded from
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// JSON-lines file holding one grain per line. A relative path is
    /// resolved against the settings file's directory.
    pub input: String,
    /// Fields every grain must carry with a non-null value
    pub required_fields: Vec<String>,
    /// If true, the first rejected grain aborts the run
    pub strict: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            input: "grains.jsonl".to_string(),
            required_fields: Vec::new(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    /// Abort once more than this many grains are rejected
    pub max_failures: Option<usize>,
    /// Abort once the rejected/read ratio exceeds this value
    pub max_failure_ratio: Option<f64>,
    /// Grains that must be read before the ratio is checked
    pub min_sample: usize,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            max_failures: None,
            max_failure_ratio: None,
            min_sample: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    pub enabled: bool,
    pub min_accepted: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_accepted: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevelArg,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevelArg::Info,
            format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Load and parse a settings file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        trace!(settings_path = %path_ref.display(), "Loading settings file");

        let raw = fs::read_to_string(path_ref)?;
        let mut settings = Self::from_toml_str(&raw).map_err(|source| Error::Settings {
            path: path_ref.display().to_string(),
            source,
        })?;
        settings.source_dir = path_ref.parent().map(Path::to_path_buf);

        debug!(settings_path = %path_ref.display(), "Settings loaded");
        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if path_ref.exists() {
            Self::load(path_ref)
        } else {
            debug!(settings_path = %path_ref.display(), "No settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// The input file, resolved against [`Settings::source_dir`] when relative.
    pub fn input_path(&self) -> PathBuf {
        let input = Path::new(&self.pipeline.input);
        match &self.source_dir {
            Some(dir) if input.is_relative() => dir.join(input),
            _ => input.to_path_buf(),
        }
    }

    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_document() {
        let raw = r#"
            [pipeline]
            input = "data/grains.jsonl"
            required_fields = ["id", "weight"]

            [threshold]
            max_failures = 10
            max_failure_ratio = 0.25
            min_sample = 40

            [audit]
            enabled = false
            min_accepted = 3

            [logging]
            level = "debug"
            format = "json"
        "#;
        let settings = Settings::from_toml_str(raw).unwrap();
        assert_eq!(settings.pipeline.input, "data/grains.jsonl");
        assert_eq!(settings.pipeline.required_fields, vec!["id", "weight"]);
        assert!(!settings.pipeline.strict);
        assert_eq!(settings.threshold.max_failures, Some(10));
        assert_eq!(settings.threshold.max_failure_ratio, Some(0.25));
        assert_eq!(settings.threshold.min_sample, 40);
        assert!(!settings.audit.enabled);
        assert_eq!(settings.audit.min_accepted, 3);
        assert_eq!(settings.logging.level, LogLevelArg::Debug);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_sections_default() {
        let settings = Settings::from_toml_str("[pipeline]\nstrict = true\n").unwrap();
        assert!(settings.pipeline.strict);
        assert_eq!(settings.pipeline.input, "grains.jsonl");
        assert_eq!(settings.threshold, ThresholdSettings::default());
        assert!(settings.audit.enabled);
    }

    #[test]
    fn bad_toml_is_a_settings_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[threshold]\nmax_failures = \"lots\"").unwrap();

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
        assert!(!err.is_pipeline_failure());
    }

    #[test]
    fn relative_input_follows_the_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("conf");
        fs::create_dir(&nested).unwrap();
        let path = nested.join("grainpipe.toml");
        fs::write(&path, "[pipeline]\ninput = \"grains.jsonl\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.input_path(), nested.join("grains.jsonl"));

        let absolute = dir.path().join("elsewhere.jsonl");
        let settings = Settings {
            pipeline: PipelineSettings {
                input: absolute.to_str().unwrap().to_string(),
                ..PipelineSettings::default()
            },
            ..settings
        };
        assert_eq!(settings.input_path(), absolute);
    }

    #[test]
    fn unloaded_settings_use_input_as_given() {
        let settings = Settings::default();
        assert_eq!(settings.input_path(), PathBuf::from("grains.jsonl"));
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
