//! Builder for runner step results.

use bddbridge_core::{StatusValue, StepResult};

/// Builds a [`StepResult`] for `[feature, scenario]`, passed by default
#[derive(Debug, Clone)]
pub struct StepResultBuilder {
    result: StepResult,
}

impl StepResultBuilder {
    /// A passing step in `scenario` of `feature`
    pub fn new(feature: &str, scenario: &str) -> Self {
        Self {
            result: StepResult {
                id: format!("Given a step <- {}.feature:3", feature.to_lowercase()),
                description: "Given a step".to_string(),
                log: Vec::new(),
                suite: vec![feature.to_string(), scenario.to_string()],
                success: true,
                skipped: false,
                time: 0.0,
            },
        }
    }

    /// Success without skip
    pub fn passed(self) -> Self {
        self.flags(true, false)
    }

    /// Skipped without success
    pub fn pending(self) -> Self {
        self.flags(false, true)
    }

    /// Neither success nor skip
    pub fn failed(self) -> Self {
        self.flags(false, false)
    }

    /// Flags that map back to `status`
    pub fn status(self, status: StatusValue) -> Self {
        match status {
            StatusValue::Passed => self.passed(),
            StatusValue::Pending => self.pending(),
            StatusValue::Failed => self.failed(),
        }
    }

    /// Set both flags
    pub fn flags(mut self, success: bool, skipped: bool) -> Self {
        self.result.success = success;
        self.result.skipped = skipped;
        self
    }

    /// Replace the suite with something arbitrary
    pub fn suite(mut self, suite: &[&str]) -> Self {
        self.result.suite = suite.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append a log line
    pub fn log(mut self, line: impl Into<String>) -> Self {
        self.result.log.push(line.into());
        self
    }

    /// Finish
    pub fn build(self) -> StepResult {
        self.result
    }
}
