//! A Gherkin engine good enough to drive the adapter in tests.
//!
//! Understands `@tag` lines, `Scenario:` headers and the contiguous step
//! lines below each header. Step outcomes come from a script keyed by step
//! text; unscripted steps pass. Once a step does not pass, the rest of its
//! scenario is reported as skipped.

use async_trait::async_trait;
use bddbridge_adapter::{AdapterError, AdapterResult, BddEngine, EventSender, FeatureRun};
use bddbridge_core::{
    EngineStepStatus, ScenarioStatus, SourceLocation, StepDescriptor, StepOutcome, TestStepFinished,
};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A scenario found in feature text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScenario {
    /// 1-based header line
    pub line: usize,
    /// Tags on the feature and the scenario
    pub tags: Vec<String>,
    /// Step lines, trimmed
    pub steps: Vec<String>,
}

/// Find the scenarios in `text`
pub fn parse_scenarios(text: &str) -> Vec<ParsedScenario> {
    let mut scenarios: Vec<ParsedScenario> = Vec::new();
    let mut feature_tags: Vec<String> = Vec::new();
    let mut pending_tags: Vec<String> = Vec::new();
    let mut in_steps = false;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.starts_with('@') {
            pending_tags.extend(line.split_whitespace().map(str::to_string));
            in_steps = false;
        } else if line.starts_with("Feature:") {
            feature_tags.append(&mut pending_tags);
            in_steps = false;
        } else if line.starts_with("Scenario:") {
            let mut tags = feature_tags.clone();
            tags.append(&mut pending_tags);
            scenarios.push(ParsedScenario {
                line: index + 1,
                tags,
                steps: Vec::new(),
            });
            in_steps = true;
        } else if line.is_empty() || line.starts_with('#') {
            in_steps = false;
        } else if in_steps {
            if let Some(scenario) = scenarios.last_mut() {
                scenario.steps.push(line.to_string());
            }
        }
    }

    scenarios
}

/// Whether `tags` satisfy an expression of the form `(a or not b) and (c)`.
///
/// An empty expression matches everything.
pub fn tags_match(expression: &str, tags: &[String]) -> bool {
    let expression = expression.trim();
    if expression.is_empty() {
        return true;
    }

    let tags: HashSet<&str> = tags.iter().map(String::as_str).collect();
    expression
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(") and (")
        .all(|group| {
            group.split(" or ").any(|term| match term.trim().strip_prefix("not ") {
                Some(tag) => !tags.contains(tag.trim()),
                None => tags.contains(term.trim()),
            })
        })
}

/// Engine emitting events from a script
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    statuses: Vec<(String, EngineStepStatus)>,
    rejecting: HashSet<String>,
    durations: Option<f64>,
    runs: Mutex<Vec<FeatureRun>>,
    resets: AtomicUsize,
}

impl ScriptedEngine {
    /// Engine where every step passes
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps whose text contains `step_text` finish with `status`
    pub fn with_step_status(mut self, step_text: impl Into<String>, status: EngineStepStatus) -> Self {
        self.statuses.push((step_text.into(), status));
        self
    }

    /// Runs of `uri` reject without emitting any event
    pub fn rejecting(mut self, uri: impl Into<String>) -> Self {
        self.rejecting.insert(uri.into());
        self
    }

    /// Report `duration` for every step
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.durations = Some(duration);
        self
    }

    /// Features handed to the engine so far
    pub fn runs(&self) -> Vec<FeatureRun> {
        self.runs.lock().clone()
    }

    /// Number of support code resets
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    fn scripted_status(&self, step: &str) -> EngineStepStatus {
        self.statuses
            .iter()
            .find(|(text, _)| step.contains(text.as_str()))
            .map(|(_, status)| *status)
            .unwrap_or(EngineStepStatus::Passed)
    }

    fn outcome(&self, status: EngineStepStatus, step: &str) -> StepOutcome {
        let mut outcome = StepOutcome::new(status);
        if let Some(duration) = self.durations {
            outcome = outcome.with_duration(duration);
        }
        if status == EngineStepStatus::Failed {
            let mut exception = Map::new();
            exception.insert("message".to_string(), Value::String(format!("{} failed", step)));
            outcome = outcome.with_exception(exception);
        }
        outcome
    }
}

#[async_trait]
impl BddEngine for ScriptedEngine {
    fn reset_support_code(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }

    async fn run_feature(&self, run: FeatureRun, events: EventSender) -> AdapterResult<bool> {
        self.runs.lock().push(run.clone());

        if self.rejecting.contains(&run.uri) {
            return Err(AdapterError::engine(run.uri, "scripted rejection"));
        }

        let scenarios: Vec<ParsedScenario> = parse_scenarios(&run.source)
            .into_iter()
            .filter(|scenario| tags_match(&run.tag_expression, &scenario.tags))
            .collect();

        let mut success = true;
        let mut steps_run = 0;
        for scenario in &scenarios {
            let location = SourceLocation::new(run.uri.clone(), scenario.line);
            events.test_case_prepared(ScenarioStatus {
                source_location: location.clone(),
                steps: vec![StepDescriptor::default(); scenario.steps.len()],
            });

            let mut blocked = false;
            for (index, step) in scenario.steps.iter().enumerate() {
                let status = if blocked {
                    EngineStepStatus::Skipped
                } else {
                    self.scripted_status(step)
                };
                if status != EngineStepStatus::Passed {
                    blocked = true;
                    success = false;
                }

                events.test_step_finished(TestStepFinished {
                    test_case: location.clone(),
                    index,
                    result: self.outcome(status, step),
                });
                steps_run += 1;
            }
        }

        if !scenarios.is_empty() {
            events.formatter_output(format!(
                "{} scenarios\n{} steps\n",
                scenarios.len(),
                steps_run
            ));
        }

        Ok(success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TAGGED: &str = "@web\nFeature: Shop\n\n  @smoke\n  Scenario: browse\n    Given a catalogue\n    When I browse\n\n  @slow\n  Scenario: checkout\n    Given a cart\n";

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parse_scenarios() {
        let scenarios = parse_scenarios(TAGGED);

        assert_eq!(
            scenarios,
            vec![
                ParsedScenario {
                    line: 5,
                    tags: tags(&["@web", "@smoke"]),
                    steps: vec!["Given a catalogue".to_string(), "When I browse".to_string()],
                },
                ParsedScenario {
                    line: 10,
                    tags: tags(&["@web", "@slow"]),
                    steps: vec!["Given a cart".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_tags_match() {
        let smoke = tags(&["@web", "@smoke"]);

        assert!(tags_match("", &smoke));
        assert!(tags_match("(@smoke)", &smoke));
        assert!(tags_match("(@smoke or @slow)", &smoke));
        assert!(tags_match("(@web) and (not @slow)", &smoke));
        assert!(!tags_match("(@slow)", &smoke));
        assert!(!tags_match("(@web) and (not @smoke)", &smoke));
    }
}
