//! Folds per-step results into a [`Report`] and writes it at run end

use bddbridge_core::{StatusValue, StepResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ReporterConfig;
use crate::error::ReporterResult;
use crate::report::Report;

/// Runner reporter producing the feature/scenario status report
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    config: ReporterConfig,
    report: Report,
}

impl ReportAggregator {
    /// Create an aggregator with an empty report
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            report: Report::new(),
        }
    }

    /// Reporter configuration
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Report accumulated since the last run completed
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Fold one completed step into the report.
    ///
    /// A result whose suite is not `[feature, scenario]` is logged and
    /// discarded without touching the report. Returns whether it was recorded.
    pub fn on_spec_complete(&mut self, result: &StepResult) -> bool {
        let (feature, scenario) = match result.suite_pair() {
            Ok(pair) => pair,
            Err(e) => {
                warn!(id = %result.id, suite = ?result.suite, error = %e, "Unexpected suite");
                return false;
            }
        };

        let status = StatusValue::of(result);
        let merged = self.report.record(feature, scenario, status);
        debug!(feature, scenario, %status, %merged, "Recorded step status");
        true
    }

    /// Write the report if an output file is configured, then reset it.
    ///
    /// Write failures are logged; the report is cleared either way. Returns
    /// the path written to.
    pub fn on_run_complete(&mut self) -> Option<PathBuf> {
        let written = match self.config.output_path() {
            Some(path) => match write_report(&self.report, &path) {
                Ok(()) => {
                    info!(path = %path.display(), features = self.report.len(), "Wrote BDD report");
                    Some(path)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot write JSON");
                    None
                }
            },
            None => None,
        };

        self.report.clear();
        written
    }
}

/// Write `report` as pretty JSON, creating parent directories and
/// overwriting any existing file
pub fn write_report(report: &Report, path: &Path) -> ReporterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, report.to_pretty_json()?)?;
    Ok(())
}
