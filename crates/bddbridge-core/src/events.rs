//! Events emitted by the Gherkin engine while it runs one feature.
//!
//! The engine writes these into a channel in emission order. For any scenario
//! a [`EngineEvent::TestCasePrepared`] is sent before the
//! [`EngineEvent::TestStepFinished`] events of its steps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{ScenarioStatus, SourceLocation};

/// Status the engine assigns to a finished step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStepStatus {
    /// Step ran and succeeded
    Passed,
    /// Step definition reported itself as pending
    Pending,
    /// No step definition matched
    Undefined,
    /// Step was not run because an earlier step did not pass
    Skipped,
    /// More than one step definition matched
    Ambiguous,
    /// Step raised an error
    Failed,
    /// Any status this bridge does not know, handled like a failure
    #[serde(other)]
    Unknown,
}

/// Outcome of a finished step as reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Engine status
    pub status: EngineStepStatus,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Error details for failed steps, one entry per exception field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<Map<String, Value>>,
}

impl StepOutcome {
    /// An outcome with no duration or exception
    pub fn new(status: EngineStepStatus) -> Self {
        Self {
            status,
            duration: None,
            exception: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Attach exception fields
    pub fn with_exception(mut self, exception: Map<String, Value>) -> Self {
        self.exception = Some(exception);
        self
    }
}

/// Payload of a `test-step-finished` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStepFinished {
    /// The scenario the step belongs to
    #[serde(rename = "testCase")]
    pub test_case: SourceLocation,
    /// 0-based position of the step within the scenario
    pub index: usize,
    /// What happened
    pub result: StepOutcome,
}

/// Messages an engine run writes to the adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EngineEvent {
    /// A scenario passed the tag filter and will run
    TestCasePrepared(ScenarioStatus),
    /// A step finished
    TestStepFinished(TestStepFinished),
    /// Text written by the summary formatter
    FormatterOutput {
        /// Raw formatter output
        text: String,
    },
}

impl EngineEvent {
    /// Event name as used on the engine's broadcaster
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::TestCasePrepared(_) => "test-case-prepared",
            EngineEvent::TestStepFinished(_) => "test-step-finished",
            EngineEvent::FormatterOutput { .. } => "formatter-output",
        }
    }
}
