//! Error types for the run adapter

use bddbridge_core::CoreError;
use thiserror::Error;

/// Failures reported by the adapter's collaborators.
///
/// None of these abort a run: the adapter logs them and carries on with
/// whatever could still be loaded or executed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    /// A feature file could not be fetched
    #[error("Failed to load file {url}: {reason}")]
    FileLoad {
        /// URL that was requested
        url: String,
        /// Loader supplied reason
        reason: String,
    },

    /// A step definition module could not be loaded
    #[error("error loading step: {url}: {reason}")]
    ModuleLoad {
        /// Module URL
        url: String,
        /// Loader supplied reason
        reason: String,
    },

    /// A feature's engine run rejected
    #[error("Engine error while running {uri}: {reason}")]
    Engine {
        /// Feature file URL
        uri: String,
        /// Engine supplied reason
        reason: String,
    },

    /// A step finished for a scenario that was never prepared
    #[error("Step finished for unprepared scenario {0}")]
    UnpreparedScenario(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AdapterError {
    /// Create a file load error
    pub fn file_load(url: impl Into<String>, reason: impl ToString) -> Self {
        AdapterError::FileLoad {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a module load error
    pub fn module_load(url: impl Into<String>, reason: impl ToString) -> Self {
        AdapterError::ModuleLoad {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an engine error
    pub fn engine(uri: impl Into<String>, reason: impl ToString) -> Self {
        AdapterError::Engine {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
