//! Crate-level error types and `Result` alias.
//!
//! [`PipelineError`] is the closed set of domain failures the pipeline raises
//! on purpose. Everything else that can go wrong while processing (I/O,
//! malformed settings, bugs) is an unanticipated failure and lives in the
//! other [`Error`] variants.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The kinds of expected pipeline failure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PipelineErrorKind {
    /// A grain failed validation against its structure/content rules.
    GrainValidation,
    /// A post-processing audit check failed.
    AuditFailed,
    /// Cumulative validation failures crossed the configured threshold.
    ValidationThresholdExceeded,
}

/// Every pipeline failure kind. Callers use this for membership checks
/// instead of matching variants one by one.
pub const PIPELINE_EXCEPTIONS: [PipelineErrorKind; 3] = [
    PipelineErrorKind::GrainValidation,
    PipelineErrorKind::AuditFailed,
    PipelineErrorKind::ValidationThresholdExceeded,
];

impl PipelineErrorKind {
    /// Human-readable label used in logs and reports.
    pub const fn error_type(self) -> &'static str {
        match self {
            PipelineErrorKind::GrainValidation => "Grain Validation Error",
            PipelineErrorKind::AuditFailed => "Audit Failed",
            PipelineErrorKind::ValidationThresholdExceeded => "Validation Threshold Exceeded",
        }
    }
}

impl fmt::Display for PipelineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_type())
    }
}

/// An expected pipeline failure: a kind plus an optional message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    kind: PipelineErrorKind,
    message: Option<String>,
}

impl PipelineError {
    pub fn new(kind: PipelineErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    pub fn grain_validation(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::GrainValidation, Some(message.into()))
    }

    pub fn audit_failed(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::AuditFailed, Some(message.into()))
    }

    pub fn threshold_exceeded(message: impl Into<String>) -> Self {
        Self::new(
            PipelineErrorKind::ValidationThresholdExceeded,
            Some(message.into()),
        )
    }

    pub fn kind(&self) -> PipelineErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error_type(&self) -> &'static str {
        self.kind.error_type()
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.error_type(), msg),
            None => f.write_str(self.kind.error_type()),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Returns true if `err`, or any error in its source chain, is a
/// [`PipelineError`]. Anything else is an unanticipated failure.
pub fn is_pipeline_exception(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<PipelineError>().is_some() {
            return true;
        }
        current = e.source();
    }
    false
}

/// Label reported for failures outside the pipeline taxonomy.
pub const UNEXPECTED_ERROR_TYPE: &str = "Unexpected Error";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings in {path}: {source}")]
    Settings {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn unexpected<E: fmt::Display>(e: E) -> Self {
        Error::Unexpected(e.to_string())
    }

    /// The pipeline kind, if this is an expected pipeline failure.
    pub fn pipeline_kind(&self) -> Option<PipelineErrorKind> {
        match self {
            Error::Pipeline(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn is_pipeline_failure(&self) -> bool {
        self.pipeline_kind().is_some()
    }

    pub fn error_type(&self) -> &'static str {
        self.pipeline_kind()
            .map(PipelineErrorKind::error_type)
            .unwrap_or(UNEXPECTED_ERROR_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_do_not_depend_on_message() {
        let cases = [
            (
                PipelineError::grain_validation("field `id` missing"),
                "Grain Validation Error",
            ),
            (PipelineError::audit_failed("counts differ"), "Audit Failed"),
            (
                PipelineError::threshold_exceeded("12 > 10"),
                "Validation Threshold Exceeded",
            ),
        ];
        for (err, label) in cases {
            assert_eq!(err.error_type(), label);
            let bare = PipelineError::new(err.kind(), None);
            assert_eq!(bare.error_type(), label);
            assert_eq!(bare.to_string(), label);
        }
    }

    #[test]
    fn membership_list_is_exactly_the_three_kinds() {
        let set: HashSet<_> = PIPELINE_EXCEPTIONS.iter().copied().collect();
        assert_eq!(PIPELINE_EXCEPTIONS.len(), 3);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&PipelineErrorKind::GrainValidation));
        assert!(set.contains(&PipelineErrorKind::AuditFailed));
        assert!(set.contains(&PipelineErrorKind::ValidationThresholdExceeded));
    }

    #[test]
    fn classifies_pipeline_errors_by_type() {
        for kind in PIPELINE_EXCEPTIONS {
            let err = PipelineError::new(kind, Some("boom".into()));
            assert!(is_pipeline_exception(&err));

            let wrapped = Error::from(err);
            assert!(is_pipeline_exception(&wrapped));
            assert_eq!(wrapped.pipeline_kind(), Some(kind));
        }

        let io = std::io::Error::other("disk on fire");
        assert!(!is_pipeline_exception(&io));
        let wrapped = Error::from(io);
        assert!(!is_pipeline_exception(&wrapped));
        assert_eq!(wrapped.error_type(), UNEXPECTED_ERROR_TYPE);
    }

    #[test]
    fn display_includes_label_and_message() {
        let err = Error::from(PipelineError::audit_failed("3 grains unaccounted for"));
        assert_eq!(err.to_string(), "Audit Failed: 3 grains unaccounted for");
    }
}
