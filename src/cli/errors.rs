use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Settings file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("{0}")]
    Grainpipe(#[from] grainpipe::Error),
}

impl AppError {
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Grainpipe(e) => e.error_type(),
            AppError::ConfigNotFound { .. } => grainpipe::error::UNEXPECTED_ERROR_TYPE,
        }
    }
}
