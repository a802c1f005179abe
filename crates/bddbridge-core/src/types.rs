//! Data model shared by the adapter and the reporter.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::error::CoreError;

static FEATURE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*)?feature:\s*").expect("valid feature label pattern"));

static SCENARIO_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)scenario:\s?").expect("valid scenario label pattern"));

/// The text of one feature file, keyed by the URL it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSource {
    /// URL (or path) the feature was served from
    pub uri: String,
    /// Raw Gherkin text
    pub text: String,
}

impl FeatureSource {
    /// Create a feature source
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
        }
    }

    /// Raw lines of the feature text, split on `\n` only
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    /// Line at a 0-based index, if the file is long enough
    pub fn line(&self, index: usize) -> Option<&str> {
        self.text.split('\n').nth(index)
    }

    /// Name of the feature, taken from the first line mentioning `feature:`.
    ///
    /// Returns an empty string when no such line exists.
    pub fn feature_description(&self) -> String {
        self.text
            .split('\n')
            .find(|line| line.to_ascii_lowercase().contains("feature:"))
            .map(|line| FEATURE_LABEL.replace(line, "").trim().to_string())
            .unwrap_or_default()
    }

    /// Name of the scenario declared on a 1-based source line, with its label stripped
    pub fn scenario_description(&self, line: usize) -> String {
        line.checked_sub(1)
            .and_then(|index| self.line(index))
            .map(|text| SCENARIO_LABEL.replace(text, "").trim().to_string())
            .unwrap_or_default()
    }

    /// Human readable text of a step within the scenario declared on `line`.
    ///
    /// Steps follow the scenario header, so step `index` sits on the 0-based
    /// line `line + index`. A blank line falls back to the scenario header.
    pub fn step_description(&self, line: usize, index: usize) -> String {
        let description = self
            .line(line + index)
            .map(str::trim)
            .unwrap_or_default();

        if !description.is_empty() {
            return description.to_string();
        }

        line.checked_sub(1)
            .and_then(|header| self.line(header))
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}

/// Position of a scenario inside a feature file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Feature file URL
    pub uri: String,
    /// 1-based line of the scenario header
    pub line: usize,
}

impl SourceLocation {
    /// Create a source location
    pub fn new(uri: impl Into<String>, line: usize) -> Self {
        Self {
            uri: uri.into(),
            line,
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.line)
    }
}

/// One step the engine plans to execute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Where the step definition matched, when known
    #[serde(default, rename = "sourceLocation", skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
}

/// A scenario the engine has prepared for execution, after tag filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStatus {
    /// Scenario position, also its identity within a run
    #[serde(rename = "sourceLocation")]
    pub source_location: SourceLocation,
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<StepDescriptor>,
}

impl ScenarioStatus {
    /// Lookup key for this scenario
    pub fn key(&self) -> ScenarioKey {
        ScenarioKey::from(&self.source_location)
    }

    /// Number of steps the scenario will report
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }
}

/// Composite `uri + line` identity of a prepared scenario
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenarioKey {
    uri: String,
    line: usize,
}

impl From<&SourceLocation> for ScenarioKey {
    fn from(location: &SourceLocation) -> Self {
        Self {
            uri: location.uri.clone(),
            line: location.line,
        }
    }
}

impl Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.line)
    }
}

/// A single step outcome in the shape the host runner reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Step text plus its `uri:line` location
    pub id: String,
    /// Step text
    pub description: String,
    /// Messages attached to the result
    #[serde(default)]
    pub log: Vec<String>,
    /// `[feature, scenario]`; anything else is rejected by the reporter
    pub suite: Vec<String>,
    /// Whether the step counts as successful
    pub success: bool,
    /// Whether the step was skipped
    pub skipped: bool,
    /// Duration in milliseconds
    #[serde(default)]
    pub time: f64,
}

impl StepResult {
    /// Feature and scenario names, if the suite is well formed
    pub fn suite_pair(&self) -> Result<(&str, &str), CoreError> {
        match self.suite.as_slice() {
            [feature, scenario] => Ok((feature.as_str(), scenario.as_str())),
            other => Err(CoreError::InvalidSuite(other.len())),
        }
    }
}
