//! Shared types used across grainpipe.
//! Includes `Grain`, `GrainRejection`, `ProcessReport`, the CLI-facing
//! `LogLevelArg` and `LogFormat`, and `CommandMode`.
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One unit of input, as read from a grain source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grain {
    /// 1-based position of the grain in its source.
    pub line: usize,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Grain {
    pub fn new(line: usize, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { line, fields }
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }
}

/// A grain that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrainRejection {
    pub line: usize,
    pub reason: String,
}

/// Summary of a completed processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    pub read: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejections: Vec<GrainRejection>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ProcessReport {
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            read: 0,
            accepted: 0,
            rejected: 0,
            rejections: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record_accepted(&mut self) {
        self.read += 1;
        self.accepted += 1;
    }

    pub fn record_rejected(&mut self, rejection: GrainRejection) {
        self.read += 1;
        self.rejected += 1;
        self.rejections.push(rejection);
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }
}

impl std::fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "read={} accepted={} rejected={}",
            self.read, self.accepted, self.rejected
        )
    }
}

/// The CLI command currently running. Logging presentation depends on it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CommandMode {
    Process,
    ShowConfig,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelArg {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevelArg> for tracing::Level {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Trace => tracing::Level::TRACE,
            LogLevelArg::Debug => tracing::Level::DEBUG,
            LogLevelArg::Info => tracing::Level::INFO,
            LogLevelArg::Warn => tracing::Level::WARN,
            LogLevelArg::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
