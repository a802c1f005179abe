//! World definition for bridge BDD tests

use bddbridge_adapter::{AdapterConfig, HostManifest, RunAdapter, RunSummary};
use bddbridge_core::{EngineStepStatus, StatusValue, StepResult};
use bddbridge_reporter::{Report, ReportAggregator, ReporterConfig};
use cucumber::World;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::data_generators::FeatureBuilder;
use crate::implementations::{ScriptedEngine, StaticModuleLoader};
use crate::TestHarness;

/// Name of the report file written under the world's temporary directory
pub const REPORT_FILE: &str = "reports/bdd.json";

/// World struct that holds state across step definitions
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct BridgeWorld {
    /// Runner CLI arguments
    pub args: Vec<String>,
    /// Last compiled tag expression
    pub tag_expression: Option<String>,

    /// Feature files served to the adapter, in registration order
    pub features: Vec<(String, FeatureBuilder)>,
    /// Step module URLs
    pub step_modules: Vec<String>,
    /// Step modules that fail to load
    pub failing_modules: Vec<String>,
    /// Scripted step statuses
    pub step_statuses: Vec<(String, EngineStepStatus)>,
    /// Features whose engine run rejects
    pub rejected_features: Vec<String>,

    /// Fakes used by the last run
    pub harness: TestHarness,
    /// Counters from the last run
    pub summary: Option<RunSummary>,

    /// Reporter fed with every delivered result
    pub aggregator: ReportAggregator,
    /// Report as it was just before the run completed
    pub report_snapshot: Option<Report>,
    /// Where the report was written, if anywhere
    pub written_report: Option<PathBuf>,
    /// Holds the report output directory
    pub output_dir: TempDir,
}

impl BridgeWorld {
    /// Fresh world writing reports into a temporary directory
    pub fn new() -> Self {
        let output_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => panic!("Failed to create report directory: {}", e),
        };
        let aggregator = ReportAggregator::new(ReporterConfig::with_output(output_dir.path(), REPORT_FILE));

        Self {
            args: Vec::new(),
            tag_expression: None,
            features: Vec::new(),
            step_modules: Vec::new(),
            failing_modules: Vec::new(),
            step_statuses: Vec::new(),
            rejected_features: Vec::new(),
            harness: TestHarness::new(),
            summary: None,
            aggregator,
            report_snapshot: None,
            written_report: None,
            output_dir,
        }
    }

    /// Feature registered under `uri`, created on first use
    pub fn feature_mut(&mut self, uri: &str, name: &str) -> &mut FeatureBuilder {
        let position = match self.features.iter().position(|(u, _)| u == uri) {
            Some(position) => position,
            None => {
                self.features.push((uri.to_string(), FeatureBuilder::new(name)));
                self.features.len() - 1
            }
        };
        &mut self.features[position].1
    }

    /// Run the adapter over everything registered so far and feed the
    /// delivered results into the reporter
    pub async fn run(&mut self) {
        let mut engine = ScriptedEngine::new();
        for (text, status) in &self.step_statuses {
            engine = engine.with_step_status(text.clone(), *status);
        }
        for uri in &self.rejected_features {
            engine = engine.rejecting(uri.clone());
        }

        let mut modules = StaticModuleLoader::new();
        for url in &self.failing_modules {
            modules = modules.failing(url.clone());
        }

        self.harness = TestHarness::new().with_engine(engine).with_modules(modules);

        let mut manifest = HostManifest::new();
        for (uri, feature) in &self.features {
            self.harness.files.insert(uri.clone(), feature.build());
            manifest = manifest.with_file(uri.clone());
        }
        for url in &self.step_modules {
            manifest = manifest.with_file(url.clone());
        }

        let config = AdapterConfig::with_args(self.args.clone());
        let mut adapter = RunAdapter::new(config, self.harness.context());
        self.summary = Some(adapter.start(&manifest).await);

        for result in self.harness.sink.results() {
            self.aggregator.on_spec_complete(&result);
        }
    }

    /// Results delivered by the last run
    pub fn results(&self) -> Vec<StepResult> {
        self.harness.sink.results()
    }

    /// Finish the reporter's run
    pub fn complete_report(&mut self) {
        self.report_snapshot = Some(self.aggregator.report().clone());
        self.written_report = self.aggregator.on_run_complete();
    }
}

impl Default for BridgeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a status name used in feature files
pub fn parse_status(name: &str) -> StatusValue {
    match name {
        "passed" => StatusValue::Passed,
        "pending" => StatusValue::Pending,
        "failed" => StatusValue::Failed,
        other => panic!("Unknown status in feature file: {}", other),
    }
}

/// Parse an engine step status name used in feature files
pub fn parse_engine_status(name: &str) -> EngineStepStatus {
    match serde_json::from_value(serde_json::Value::String(name.to_string())) {
        Ok(status) => status,
        Err(e) => panic!("Unknown engine status {}: {}", name, e),
    }
}
