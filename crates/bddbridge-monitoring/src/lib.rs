//! Logging setup shared by the bridge's binaries and test harnesses.

use serde::{Deserialize, Serialize};
use std::env;

pub mod logging;

pub use logging::{init_logging, init_test_tracing, LogExt};

/// Environment variable holding the default log filter
pub const LOG_FILTER_ENV: &str = "BDDBRIDGE_LOG_FILTER";

/// Environment variable switching to JSON log lines
pub const LOG_JSON_ENV: &str = "BDDBRIDGE_LOG_JSON";

/// Configuration for the tracing subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Service name attached to the startup event
    pub service_name: String,
    /// Filter used when `RUST_LOG` is not set (e.g., "info,bddbridge_adapter=debug")
    pub log_filter: String,
    /// Emit JSON lines instead of human-readable output
    pub enable_json_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            service_name: "bddbridge".to_string(),
            log_filter: "info".to_string(),
            enable_json_logging: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults overridden from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(json) = lookup(LOG_JSON_ENV) {
            config.enable_json_logging = matches!(json.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Replace the service name
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }
}
