//!
//! BDD Bridge Core - shared model for the runner/engine bridge
//!
//! This crate defines the data that flows between a Gherkin engine, the
//! run adapter that drives it, and the reporter that folds results into a
//! feature/scenario status report. It also hosts the tag expression
//! compiler used to turn launch arguments into an engine filter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error types
pub mod error;

/// Engine event stream
pub mod events;

/// Status values and merge precedence
pub mod status;

/// Launch argument to tag expression compiler
pub mod tags;

/// Feature sources, scenarios and step results
pub mod types;

pub use error::CoreError;
pub use events::{EngineEvent, EngineStepStatus, StepOutcome, TestStepFinished};
pub use status::StatusValue;
pub use tags::{compile_tag_expression, TagExpressionCompiler};
pub use types::{FeatureSource, ScenarioKey, ScenarioStatus, SourceLocation, StepDescriptor, StepResult};
