use thiserror::Error;

/// Core error type for the BDD bridge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Configuration error (bad manifest pattern, missing value)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A step result whose suite is not `[feature, scenario]`
    #[error("Invalid suite: expected 2 entries, got {0}")]
    InvalidSuite(usize),
}

impl From<regex::Error> for CoreError {
    fn from(err: regex::Error) -> Self {
        CoreError::ConfigurationError(err.to_string())
    }
}
