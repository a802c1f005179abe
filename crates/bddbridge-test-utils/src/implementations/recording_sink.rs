//! Runner sink that records every call.

use bddbridge_adapter::RunnerSink;
use bddbridge_core::StepResult;
use parking_lot::Mutex;
use serde_json::Value;

/// One call made on the sink
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    /// `info({ total })`
    Info(usize),
    /// `result(result)`
    Result(StepResult),
    /// `complete({ coverage })`
    Complete(Option<Value>),
}

/// Records calls in arrival order
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    /// Delivered step results
    pub fn results(&self) -> Vec<StepResult> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Result(result) => Some(result.clone()),
                _ => None,
            })
            .collect()
    }

    /// Totals announced through `info`
    pub fn announced_totals(&self) -> Vec<usize> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Info(total) => Some(*total),
                _ => None,
            })
            .collect()
    }

    /// Coverage passed to `complete`, if it was called
    pub fn completion(&self) -> Option<Option<Value>> {
        self.calls.lock().iter().find_map(|call| match call {
            SinkCall::Complete(coverage) => Some(coverage.clone()),
            _ => None,
        })
    }

    /// Forget recorded calls
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl RunnerSink for RecordingSink {
    fn info(&self, total: usize) {
        self.calls.lock().push(SinkCall::Info(total));
    }

    fn result(&self, result: StepResult) {
        self.calls.lock().push(SinkCall::Result(result));
    }

    fn complete(&self, coverage: Option<Value>) {
        self.calls.lock().push(SinkCall::Complete(coverage));
    }
}
