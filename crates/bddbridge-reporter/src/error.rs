//! Error types for the JSON reporter

use thiserror::Error;

/// Reporter errors
#[derive(Error, Debug)]
pub enum ReporterError {
    /// Creating the output directory or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid reporter configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for ReporterError {
    fn from(err: serde_json::Error) -> Self {
        ReporterError::Serialization(err.to_string())
    }
}

/// Result type for reporter operations
pub type ReporterResult<T> = Result<T, ReporterError>;
