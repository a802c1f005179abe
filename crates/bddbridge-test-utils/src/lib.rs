//! Testing utilities for the BDD bridge.
//!
//! In-memory fakes for every collaborator the run adapter talks to, a
//! scripted Gherkin engine, builders for feature text and step results, and
//! (behind the `bdd` feature) a cucumber world with step definitions.

pub mod data_generators;
pub mod implementations;

/// BDD testing utilities
#[cfg(feature = "bdd")]
pub mod bdd;

pub use data_generators::{FeatureBuilder, StepResultBuilder};
pub use implementations::{
    InMemoryFileLoader, RecordingSink, ScriptedEngine, SinkCall, StaticModuleLoader,
};

use bddbridge_adapter::RunContext;
use std::sync::Arc;

/// Fakes wired into a [`RunContext`], kept alongside for inspection
#[derive(Debug, Clone)]
pub struct TestHarness {
    /// Feature file server
    pub files: Arc<InMemoryFileLoader>,
    /// Step module loader
    pub modules: Arc<StaticModuleLoader>,
    /// Gherkin engine
    pub engine: Arc<ScriptedEngine>,
    /// Host result sink
    pub sink: Arc<RecordingSink>,
}

impl TestHarness {
    /// Harness with empty fakes
    pub fn new() -> Self {
        Self {
            files: Arc::new(InMemoryFileLoader::new()),
            modules: Arc::new(StaticModuleLoader::new()),
            engine: Arc::new(ScriptedEngine::new()),
            sink: Arc::new(RecordingSink::new()),
        }
    }

    /// Replace the engine
    pub fn with_engine(mut self, engine: ScriptedEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Replace the module loader
    pub fn with_modules(mut self, modules: StaticModuleLoader) -> Self {
        self.modules = Arc::new(modules);
        self
    }

    /// Context handing the fakes to an adapter
    pub fn context(&self) -> RunContext {
        RunContext::new(
            self.files.clone(),
            self.modules.clone(),
            self.engine.clone(),
            self.sink.clone(),
        )
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
