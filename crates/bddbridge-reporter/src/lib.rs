//! # BDD Bridge Reporter
//!
//! Aggregates the runner's per-step results into a nested
//! feature → scenario status report and optionally writes it to disk as
//! pretty-printed JSON at the end of each run.
//!
//! Statuses merge with the precedence `failed > pending > passed`, so a
//! scenario or feature that failed once stays failed for the rest of the run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod report;

pub use aggregator::{write_report, ReportAggregator};
pub use config::{normalize_win_path, BddJsonReporterConfig, ReporterConfig};
pub use error::{ReporterError, ReporterResult};
pub use report::{FeatureReport, Report};
