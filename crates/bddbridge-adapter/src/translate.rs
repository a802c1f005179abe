//! Translation of `test-step-finished` events into runner step results

use bddbridge_core::{EngineStepStatus, FeatureSource, StepResult, TestStepFinished};
use serde_json::{Map, Value};

const SCENARIO_HEADER: &str = "Scenario:";

/// Identifier shown by the runner: step text plus `uri:line`.
///
/// A description that is really the scenario header points at the header
/// line, otherwise at the step's own line.
pub fn step_id(description: &str, finished: &TestStepFinished) -> String {
    let location = &finished.test_case;
    let line = if description.starts_with(SCENARIO_HEADER) {
        location.line
    } else {
        location.line + finished.index + 1
    };

    format!("{} <- {}:{}", description, location.uri, line)
}

/// Build the runner result for a finished step of a scenario in `feature`
pub fn translate_step(feature: &FeatureSource, finished: &TestStepFinished) -> StepResult {
    let location = &finished.test_case;
    let description = feature.step_description(location.line, finished.index);
    let id = step_id(&description, finished);
    let suite = vec![
        feature.feature_description(),
        feature.scenario_description(location.line),
    ];

    let mut result = StepResult {
        id,
        description,
        log: Vec::new(),
        suite,
        success: false,
        skipped: false,
        time: finished.result.duration.unwrap_or(0.0),
    };

    match finished.result.status {
        EngineStepStatus::Passed => {
            result.success = true;
        }
        EngineStepStatus::Pending => {
            result.skipped = true;
            result.log.push(format!(
                "Step is pending: {} -> {}",
                result.suite.join(" -> "),
                result.id
            ));
        }
        EngineStepStatus::Undefined => {
            result.success = true;
            result.skipped = true;
            result.log.push(format!(
                "Step is undefined: {} -> {}",
                result.suite.join(" -> "),
                result.id
            ));
        }
        EngineStepStatus::Skipped => {
            result.success = true;
            result.skipped = true;
        }
        EngineStepStatus::Ambiguous => {
            result.log.push(format!("Step is ambiguous: {}", result.id));
        }
        EngineStepStatus::Failed | EngineStepStatus::Unknown => {
            let message = failure_message(&result.id, finished.result.exception.as_ref());
            result.log.push(message);
        }
    }

    result
}

/// `Step: <id>` followed by one `key: value` line per exception field
fn failure_message(id: &str, exception: Option<&Map<String, Value>>) -> String {
    let mut message = format!("Step: {}", id);
    for (key, value) in exception.into_iter().flatten() {
        message.push('\n');
        message.push_str(key);
        message.push_str(": ");
        match value {
            Value::String(text) => message.push_str(text),
            other => message.push_str(&other.to_string()),
        }
    }
    message
}
