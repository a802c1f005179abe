//! Interfaces to the systems the adapter drives but does not implement:
//! the host's file server and module loader, the Gherkin engine and the
//! host's result sink.

use async_trait::async_trait;
use bddbridge_core::{EngineEvent, ScenarioStatus, StepResult, TestStepFinished};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::error::AdapterResult;

/// Synchronous text fetch from the host's file server
pub trait FileLoader: Send + Sync {
    /// Fetch the text at `url`, blocking until it is available
    fn load(&self, url: &str) -> AdapterResult<String>;
}

/// Loads a step definition module into the execution environment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Load the module at `url`; resolves once the load has settled
    async fn load_module(&self, url: &str) -> AdapterResult<()>;
}

/// One feature handed to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRun {
    /// Feature file URL
    pub uri: String,
    /// Gherkin source
    pub source: String,
    /// Tag expression for the pickle filter; empty means no filter
    pub tag_expression: String,
}

/// Gherkin engine able to execute a single feature
#[async_trait]
pub trait BddEngine: Send + Sync {
    /// Reset the step definition library before step modules are loaded
    fn reset_support_code(&self) {}

    /// Build the test cases for `run`, execute them, and report progress
    /// through `events`. Resolves to the engine's overall success flag.
    async fn run_feature(&self, run: FeatureRun, events: EventSender) -> AdapterResult<bool>;
}

/// The host runner's reporting API
pub trait RunnerSink: Send + Sync {
    /// Announce the total number of steps
    fn info(&self, total: usize);

    /// Deliver one step result
    fn result(&self, result: StepResult);

    /// Finish the run, passing through any coverage data
    fn complete(&self, coverage: Option<Value>);
}

/// Reads the coverage object the instrumented environment left behind
pub type CoverageSource = Arc<dyn Fn() -> Option<Value> + Send + Sync>;

/// Messages flowing from feature runs back to the adapter
#[derive(Debug)]
pub(crate) enum RunMessage {
    Event { uri: String, event: EngineEvent },
    FeatureFinished { uri: String, outcome: AdapterResult<bool> },
}

/// Write end of a feature run's event channel.
///
/// Events sent through one sender are received in send order.
#[derive(Debug, Clone)]
pub struct EventSender {
    uri: String,
    tx: UnboundedSender<RunMessage>,
}

impl EventSender {
    pub(crate) fn new(uri: String, tx: UnboundedSender<RunMessage>) -> Self {
        Self { uri, tx }
    }

    /// Feature this sender reports for
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Send a raw engine event
    pub fn send(&self, event: EngineEvent) {
        let message = RunMessage::Event {
            uri: self.uri.clone(),
            event,
        };
        if self.tx.send(message).is_err() {
            debug!(uri = %self.uri, "Run already finished, dropping engine event");
        }
    }

    /// A scenario will run
    pub fn test_case_prepared(&self, status: ScenarioStatus) {
        self.send(EngineEvent::TestCasePrepared(status));
    }

    /// A step finished
    pub fn test_step_finished(&self, finished: TestStepFinished) {
        self.send(EngineEvent::TestStepFinished(finished));
    }

    /// Summary formatter output
    pub fn formatter_output(&self, text: impl Into<String>) {
        self.send(EngineEvent::FormatterOutput { text: text.into() });
    }
}

/// Collaborators a run adapter owns for its lifetime
#[derive(Clone)]
pub struct RunContext {
    /// Feature file fetcher
    pub file_loader: Arc<dyn FileLoader>,
    /// Step definition module loader
    pub module_loader: Arc<dyn ModuleLoader>,
    /// Gherkin engine
    pub engine: Arc<dyn BddEngine>,
    /// Host result sink
    pub sink: Arc<dyn RunnerSink>,
    /// Coverage lookup, if the environment is instrumented
    pub coverage: Option<CoverageSource>,
}

impl RunContext {
    /// Create a context without coverage
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        module_loader: Arc<dyn ModuleLoader>,
        engine: Arc<dyn BddEngine>,
        sink: Arc<dyn RunnerSink>,
    ) -> Self {
        Self {
            file_loader,
            module_loader,
            engine,
            sink,
            coverage: None,
        }
    }

    /// Attach a coverage lookup
    pub fn with_coverage(mut self, coverage: CoverageSource) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub(crate) fn coverage(&self) -> Option<Value> {
        self.coverage.as_ref().and_then(|source| source())
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("coverage", &self.coverage.is_some())
            .finish_non_exhaustive()
    }
}
