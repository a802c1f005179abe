//! BDD Bridge Run Adapter
//!
//! Loads feature files and step definition modules, runs each feature
//! through a Gherkin engine and translates the engine's event stream into
//! the per-step results a browser test runner reports.
//!
//! Everything the adapter talks to (file server, module loader, engine,
//! result sink) is supplied through a [`RunContext`], so one adapter owns
//! its own file cache and nothing is shared through process globals.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Run orchestration
pub mod adapter;

/// Collaborator interfaces
pub mod collaborators;

/// Adapter configuration and host manifest
pub mod config;

/// Error types
pub mod error;

/// Feature file cache
pub mod file_cache;

/// Summary formatter output
pub mod summary;

/// Engine event to step result translation
pub mod translate;

pub use adapter::{RunAdapter, RunPhase, RunSummary};
pub use collaborators::{
    BddEngine, CoverageSource, EventSender, FeatureRun, FileLoader, ModuleLoader, RunContext, RunnerSink,
};
pub use config::{AdapterConfig, FileEntry, HostManifest};
pub use error::{AdapterError, AdapterResult};
pub use file_cache::FileCache;
pub use summary::SummaryLog;
pub use translate::translate_step;
