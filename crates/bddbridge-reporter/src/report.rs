//! Nested feature → scenario status report

use bddbridge_core::StatusValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{ReporterError, ReporterResult};

/// Status of one feature and each of its scenarios.
///
/// The feature's aggregate lives in its own field so a scenario can be named
/// anything, including `featureStatus`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Merged status of every scenario seen so far; unset until the first one
    #[serde(rename = "featureStatus")]
    pub feature_status: Option<StatusValue>,

    /// Scenario description → merged status, in first-seen order
    #[serde(default)]
    pub scenarios: IndexMap<String, StatusValue>,
}

impl FeatureReport {
    /// Status recorded for `scenario`
    pub fn scenario(&self, scenario: &str) -> Option<StatusValue> {
        self.scenarios.get(scenario).copied()
    }
}

/// Feature description → [`FeatureReport`], in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    features: IndexMap<String, FeatureReport>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one status into `scenario` of `feature`, then the scenario's
    /// merged status into the feature aggregate.
    ///
    /// Returns the scenario's status after the merge.
    pub fn record(&mut self, feature: &str, scenario: &str, status: StatusValue) -> StatusValue {
        let entry = self.features.entry(feature.to_string()).or_default();

        let scenario_status = StatusValue::merge_into(entry.scenario(scenario), status);
        entry.scenarios.insert(scenario.to_string(), scenario_status);
        entry.feature_status = Some(StatusValue::merge_into(entry.feature_status, scenario_status));

        scenario_status
    }

    /// Entry for `feature`
    pub fn feature(&self, feature: &str) -> Option<&FeatureReport> {
        self.features.get(feature)
    }

    /// Aggregate status of `feature`
    pub fn feature_status(&self, feature: &str) -> Option<StatusValue> {
        self.feature(feature).and_then(|entry| entry.feature_status)
    }

    /// Status of `scenario` within `feature`
    pub fn scenario_status(&self, feature: &str, scenario: &str) -> Option<StatusValue> {
        self.feature(feature).and_then(|entry| entry.scenario(scenario))
    }

    /// Iterate over features in the order they were first recorded
    pub fn features(&self) -> impl Iterator<Item = (&str, &FeatureReport)> {
        self.features.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no feature has been recorded
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.features.clear();
    }

    /// JSON text indented by four spaces
    pub fn to_pretty_json(&self) -> ReporterResult<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|e| ReporterError::Serialization(e.to_string()))
    }

    /// Parse a report previously written by [`Report::to_pretty_json`]
    pub fn from_json_str(json: &str) -> ReporterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
