//! Configuration for the JSON reporter
//!
//! Mirrors the host runner's configuration shape:
//! `{ "basePath": "...", "bddJSONReporter": { "outputFile": "..." } }`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ReporterError, ReporterResult};

/// Environment variable overriding the base path
pub const BASE_PATH_ENV: &str = "BDDBRIDGE_BASE_PATH";

/// Environment variable overriding the report output file
pub const REPORT_FILE_ENV: &str = "BDDBRIDGE_REPORT_FILE";

/// Reporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterConfig {
    /// Directory relative output paths are resolved against
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// JSON report settings
    #[serde(default, rename = "bddJSONReporter")]
    pub bdd_json: BddJsonReporterConfig,
}

/// Settings for the `bdd-json` reporter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BddJsonReporterConfig {
    /// Where to write the report; nothing is written when unset or empty
    #[serde(default)]
    pub output_file: Option<String>,
}

fn default_base_path() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            bdd_json: BddJsonReporterConfig::default(),
        }
    }
}

impl ReporterConfig {
    /// Configuration writing to `output_file` under `base_path`
    pub fn with_output(base_path: impl Into<PathBuf>, output_file: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            bdd_json: BddJsonReporterConfig {
                output_file: Some(output_file.into()),
            },
        }
    }

    /// Parse the host's JSON configuration
    pub fn from_json_str(json: &str) -> ReporterResult<Self> {
        serde_json::from_str(json).map_err(|e| ReporterError::Configuration(e.to_string()))
    }

    /// Defaults overridden by environment variables
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(base_path) = env::var(BASE_PATH_ENV) {
            config.base_path = PathBuf::from(base_path);
        }

        if let Ok(output_file) = env::var(REPORT_FILE_ENV) {
            config.bdd_json.output_file = Some(output_file);
        }

        debug!(?config, "Loaded reporter configuration");
        config
    }

    /// Absolute or base-relative path of the report file, if one is configured
    pub fn output_path(&self) -> Option<PathBuf> {
        let output_file = self
            .bdd_json
            .output_file
            .as_deref()
            .filter(|file| !file.trim().is_empty())?;

        let output_file = PathBuf::from(normalize_win_path(output_file));
        if output_file.is_absolute() {
            Some(output_file)
        } else {
            Some(Path::new(&normalize_win_path(&self.base_path.to_string_lossy())).join(output_file))
        }
    }
}

/// Windows separators become `/` so paths resolve the same on every platform
pub fn normalize_win_path(path: &str) -> String {
    path.replace('\\', "/")
}
