//! Runner sink that feeds the JSON reporter

use bddbridge_adapter::RunnerSink;
use bddbridge_core::StepResult;
use bddbridge_reporter::{Report, ReportAggregator};
use parking_lot::Mutex;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Hands every result to a [`ReportAggregator`] and finishes the report when
/// the run completes. Calls are also forwarded to an optional inner sink.
pub struct ReportingSink {
    aggregator: Mutex<ReportAggregator>,
    inner: Option<Arc<dyn RunnerSink>>,
    written: Mutex<Option<PathBuf>>,
}

impl ReportingSink {
    /// Sink reporting into `aggregator` only
    pub fn new(aggregator: ReportAggregator) -> Self {
        Self {
            aggregator: Mutex::new(aggregator),
            inner: None,
            written: Mutex::new(None),
        }
    }

    /// Also forward every call to `inner`
    pub fn forwarding_to(mut self, inner: Arc<dyn RunnerSink>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Snapshot of the report collected so far in the current run
    pub fn report(&self) -> Report {
        self.aggregator.lock().report().clone()
    }

    /// Path the last completed run wrote its report to
    pub fn written_report(&self) -> Option<PathBuf> {
        self.written.lock().clone()
    }
}

impl RunnerSink for ReportingSink {
    fn info(&self, total: usize) {
        debug!(total, "Run announced");
        if let Some(inner) = &self.inner {
            inner.info(total);
        }
    }

    fn result(&self, result: StepResult) {
        self.aggregator.lock().on_spec_complete(&result);
        if let Some(inner) = &self.inner {
            inner.result(result);
        }
    }

    fn complete(&self, coverage: Option<Value>) {
        let written = self.aggregator.lock().on_run_complete();
        *self.written.lock() = written;
        if let Some(inner) = &self.inner {
            inner.complete(coverage);
        }
    }
}

impl std::fmt::Debug for ReportingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportingSink")
            .field("aggregator", &*self.aggregator.lock())
            .field("forwarding", &self.inner.is_some())
            .finish()
    }
}
