//! # BDD Bridge
//!
//! Runs Gherkin feature files inside a browser test runner and reports the
//! outcome in the runner's result shape:
//!
//! - [`model`] holds the shared data model and the tag expression compiler.
//! - [`adapter`] drives the engine per feature and turns its event stream
//!   into per-step runner results.
//! - [`reporter`] folds those results into a feature → scenario status
//!   report and writes it as JSON.
//!
//! [`ReportingSink`] wires the two halves together the way the host runner
//! does, and [`replay`] rebuilds a report from recorded results.

#![forbid(unsafe_code)]

pub use bddbridge_adapter as adapter;
pub use bddbridge_core as model;
pub use bddbridge_monitoring as monitoring;
pub use bddbridge_reporter as reporter;

pub mod replay;
pub mod sink;

pub use bddbridge_core::{compile_tag_expression, StatusValue, StepResult};
pub use replay::{replay_results, ReplayStats};
pub use sink::ReportingSink;
