//! Adapter configuration and the host runner's file manifest

use bddbridge_core::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default pattern for feature files served by the host
pub const DEFAULT_FEATURE_PATTERN: &str = r"\.feature$";

/// Default pattern for step definition modules
pub const DEFAULT_STEP_PATTERN: &str = r"steps(/.*)?\.js$";

static FEATURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_FEATURE_PATTERN).expect("valid default feature pattern"));

static STEP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_STEP_PATTERN).expect("valid default step pattern"));

/// Run adapter configuration
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Launch arguments forwarded by the host runner
    pub args: Vec<String>,

    /// Manifest entries matching this are feature files
    pub feature_pattern: Regex,

    /// Manifest entries matching this are step definition modules
    pub step_pattern: Regex,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            feature_pattern: FEATURE_PATTERN.clone(),
            step_pattern: STEP_PATTERN.clone(),
        }
    }
}

impl AdapterConfig {
    /// Configuration with default manifest patterns
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Override the manifest patterns
    pub fn with_patterns(mut self, feature_pattern: &str, step_pattern: &str) -> Result<Self, CoreError> {
        self.feature_pattern = Regex::new(feature_pattern)?;
        self.step_pattern = Regex::new(step_pattern)?;
        Ok(self)
    }
}

/// Metadata the host keeps for each served file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Whether the file is included in the page
    #[serde(default = "default_true")]
    pub included: bool,
    /// Whether the host serves the file
    #[serde(default = "default_true")]
    pub served: bool,
    /// Whether the host watches the file for changes
    #[serde(default)]
    pub watched: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FileEntry {
    fn default() -> Self {
        Self {
            included: true,
            served: true,
            watched: false,
        }
    }
}

/// Files the host runner serves, keyed by URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostManifest {
    files: BTreeMap<String, FileEntry>,
}

impl HostManifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with default metadata
    pub fn with_file(mut self, url: impl Into<String>) -> Self {
        self.insert(url, FileEntry::default());
        self
    }

    /// Add or replace a file entry
    pub fn insert(&mut self, url: impl Into<String>, entry: FileEntry) {
        self.files.insert(url.into(), entry);
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the manifest has no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// URLs matching `pattern`, in manifest order
    pub fn matching(&self, pattern: &Regex) -> Vec<String> {
        self.files
            .keys()
            .filter(|url| pattern.is_match(url))
            .cloned()
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for HostManifest {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        iter.into_iter()
            .fold(HostManifest::new(), |manifest, url| manifest.with_file(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> HostManifest {
        [
            "/base/features/login.feature",
            "/base/features/steps/login.js",
            "/base/features/steps.js",
            "/base/src/app.js",
            "/base/features/login.feature.bak",
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_default_patterns_split_manifest() {
        let config = AdapterConfig::default();
        let manifest = manifest();

        assert_eq!(
            manifest.matching(&config.feature_pattern),
            vec!["/base/features/login.feature".to_string()]
        );
        assert_eq!(
            manifest.matching(&config.step_pattern),
            vec![
                "/base/features/steps.js".to_string(),
                "/base/features/steps/login.js".to_string(),
            ]
        );
    }

    #[test]
    fn test_custom_patterns() {
        let config = AdapterConfig::with_args(["--tags", "@a"])
            .with_patterns(r"\.gherkin$", r"_steps\.js$")
            .unwrap();
        let manifest: HostManifest = ["a.gherkin", "a_steps.js", "a.feature"].into_iter().collect();

        assert_eq!(config.args, vec!["--tags".to_string(), "@a".to_string()]);
        assert_eq!(manifest.matching(&config.feature_pattern), vec!["a.gherkin".to_string()]);
        assert_eq!(manifest.matching(&config.step_pattern), vec!["a_steps.js".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let result = AdapterConfig::default().with_patterns("(", r"\.js$");
        assert!(matches!(result, Err(CoreError::ConfigurationError(_))));
    }

    #[test]
    fn test_manifest_deserializes_from_host_shape() {
        let manifest: HostManifest = serde_json::from_str(
            r#"{ "/base/a.feature": { "included": false }, "/base/steps/a.js": {} }"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(
            manifest.matching(&Regex::new(r"\.feature$").unwrap()),
            vec!["/base/a.feature".to_string()]
        );
    }
}
