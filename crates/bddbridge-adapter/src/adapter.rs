//! The run adapter.
//!
//! A run moves through `Idle -> LoadingSteps -> RunningFeatures -> Completed`.
//! Feature files are fetched up front, step modules are loaded in parallel,
//! then every feature is handed to the engine at once. Engine events from all
//! features arrive on one channel; a feature's completion message is always
//! queued behind its own events, so counting completions is enough to know
//! when every result has been collected.

use bddbridge_core::{
    EngineEvent, FeatureSource, ScenarioKey, ScenarioStatus, StepResult, TagExpressionCompiler,
    TestStepFinished,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::collaborators::{EventSender, FeatureRun, RunContext, RunMessage};
use crate::config::{AdapterConfig, HostManifest};
use crate::error::{AdapterError, AdapterResult};
use crate::file_cache::FileCache;
use crate::summary::{SummaryLog, SUMMARY_TARGET};
use crate::translate::translate_step;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No run started yet
    Idle,
    /// Features fetched, step modules loading
    LoadingSteps,
    /// Engine executing features
    RunningFeatures,
    /// Results delivered to the host
    Completed,
}

/// Counters describing a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tag expression the engine filtered with
    pub tag_expression: String,
    /// Features that loaded and were scheduled
    pub total_features: usize,
    /// Features whose engine run settled
    pub completed_features: usize,
    /// Features whose engine run rejected
    pub rejected_features: usize,
    /// Step modules that failed to load
    pub failed_step_modules: usize,
    /// Steps announced to the host
    pub total_steps: usize,
    /// Step results delivered to the host
    pub delivered_results: usize,
}

/// Everything collected while features run
#[derive(Debug, Default)]
struct RunState {
    scenarios: HashMap<ScenarioKey, ScenarioStatus>,
    total_steps: usize,
    results: Vec<StepResult>,
    log: SummaryLog,
    completed_features: usize,
    rejected_features: usize,
}

impl RunState {
    fn handle_event(&mut self, features: &HashMap<String, FeatureSource>, uri: &str, event: EngineEvent) {
        match event {
            EngineEvent::TestCasePrepared(status) => self.prepare(status),
            EngineEvent::TestStepFinished(finished) => {
                if let Err(e) = self.finish_step(features, &finished) {
                    warn!(uri, error = %e, "Discarding step event");
                }
            }
            EngineEvent::FormatterOutput { text } => match features.get(uri) {
                Some(feature) => self.log.record(feature, &text),
                None => debug!(uri, "Formatter output for unknown feature"),
            },
        }
    }

    fn prepare(&mut self, status: ScenarioStatus) {
        debug!(scenario = %status.key(), steps = status.total_steps(), "Test case prepared");
        self.total_steps += status.total_steps();
        self.scenarios.insert(status.key(), status);
    }

    fn finish_step(
        &mut self,
        features: &HashMap<String, FeatureSource>,
        finished: &TestStepFinished,
    ) -> AdapterResult<()> {
        let key = ScenarioKey::from(&finished.test_case);
        if !self.scenarios.contains_key(&key) {
            return Err(AdapterError::UnpreparedScenario(key.to_string()));
        }

        let feature = features
            .get(&finished.test_case.uri)
            .ok_or_else(|| AdapterError::file_load(&finished.test_case.uri, "feature source not loaded"))?;

        self.results.push(translate_step(feature, finished));
        Ok(())
    }

    fn record_outcome(&mut self, uri: &str, outcome: AdapterResult<bool>) {
        self.completed_features += 1;
        match outcome {
            Ok(success) => debug!(uri, success, "Feature finished"),
            Err(e) => {
                self.rejected_features += 1;
                warn!(uri, error = %e, "Feature run rejected");
            }
        }
    }
}

/// Bridges the host runner and the Gherkin engine for one run at a time
pub struct RunAdapter {
    config: AdapterConfig,
    context: RunContext,
    files: FileCache,
    compiler: TagExpressionCompiler,
    phase: RunPhase,
}

impl RunAdapter {
    /// Create an idle adapter owning `context`
    pub fn new(config: AdapterConfig, context: RunContext) -> Self {
        let files = FileCache::new(Arc::clone(&context.file_loader));
        Self {
            config,
            context,
            files,
            compiler: TagExpressionCompiler::new(),
            phase: RunPhase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Adapter configuration
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Files fetched by the current or last run
    pub fn files(&self) -> &FileCache {
        &self.files
    }

    /// Run every feature in `manifest` and report to the host sink.
    ///
    /// Load and engine failures are logged, never returned: the host always
    /// receives `info`, the collected results and `complete`.
    pub async fn start(&mut self, manifest: &HostManifest) -> RunSummary {
        self.transition(RunPhase::LoadingSteps);
        self.files.clear();

        let feature_urls = manifest.matching(&self.config.feature_pattern);
        let step_urls = manifest.matching(&self.config.step_pattern);
        let features = self.files.load_test_files(&feature_urls);
        let tag_expression = self.compiler.compile(&self.config.args);

        info!(
            features = features.len(),
            step_modules = step_urls.len(),
            tag_expression = %tag_expression,
            "Starting run"
        );

        let mut summary = RunSummary {
            tag_expression: tag_expression.clone(),
            total_features: features.len(),
            ..RunSummary::default()
        };

        self.context.engine.reset_support_code();

        if features.is_empty() {
            info!("No feature files to run");
            self.finish(RunState::default(), &mut summary);
            return summary;
        }

        summary.failed_step_modules = self.load_step_modules(&step_urls).await;

        self.transition(RunPhase::RunningFeatures);
        let state = self.run_features(features, &tag_expression).await;
        self.finish(state, &mut summary);
        summary
    }

    /// Load all step modules in parallel; returns how many failed
    async fn load_step_modules(&self, urls: &[String]) -> usize {
        if urls.is_empty() {
            debug!("No step modules to load");
            return 0;
        }

        let loader = &self.context.module_loader;
        let outcomes = join_all(urls.iter().map(|url| async move {
            let outcome = loader.load_module(url).await;
            (url, outcome)
        }))
        .await;

        outcomes
            .into_iter()
            .filter(|(url, outcome)| match outcome {
                Ok(()) => {
                    debug!(url = %url, "Loaded step module");
                    false
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "error loading step");
                    true
                }
            })
            .count()
    }

    async fn run_features(&self, features: Vec<FeatureSource>, tag_expression: &str) -> RunState {
        let total = features.len();
        let sources: HashMap<String, FeatureSource> = features
            .iter()
            .map(|feature| (feature.uri.clone(), feature.clone()))
            .collect();

        let (tx, mut rx) = mpsc::unbounded_channel();

        let runs = features
            .into_iter()
            .map(|feature| {
                let engine = Arc::clone(&self.context.engine);
                let events = EventSender::new(feature.uri.clone(), tx.clone());
                let done = tx.clone();
                let run = FeatureRun {
                    uri: feature.uri,
                    source: feature.text,
                    tag_expression: tag_expression.to_string(),
                };

                async move {
                    let uri = run.uri.clone();
                    let outcome = engine.run_feature(run, events).await;
                    if done.send(RunMessage::FeatureFinished { uri, outcome }).is_err() {
                        error!("Run collector stopped before all features finished");
                    }
                }
            })
            .collect::<Vec<_>>();
        drop(tx);

        let mut state = RunState::default();
        {
            let collect = async {
                while state.completed_features < total {
                    match rx.recv().await {
                        Some(RunMessage::Event { uri, event }) => state.handle_event(&sources, &uri, event),
                        Some(RunMessage::FeatureFinished { uri, outcome }) => state.record_outcome(&uri, outcome),
                        None => {
                            error!(
                                completed = state.completed_features,
                                total, "Event channel closed before every feature finished"
                            );
                            break;
                        }
                    }
                }
            };

            tokio::join!(join_all(runs), collect);
        }

        state
    }

    /// Flush logs and deliver everything to the host
    fn finish(&mut self, mut state: RunState, summary: &mut RunSummary) {
        if !state.log.is_empty() {
            info!(target: SUMMARY_TARGET, "{}", state.log.flush());
        }

        summary.completed_features = state.completed_features;
        summary.rejected_features = state.rejected_features;
        summary.total_steps = state.total_steps;
        summary.delivered_results = state.results.len();

        let sink = &self.context.sink;
        sink.info(state.total_steps);
        for result in state.results {
            sink.result(result);
        }
        sink.complete(self.context.coverage());

        self.transition(RunPhase::Completed);
        info!(
            features = summary.completed_features,
            rejected = summary.rejected_features,
            steps = summary.total_steps,
            results = summary.delivered_results,
            "Run complete"
        );
    }

    fn transition(&mut self, next: RunPhase) {
        debug!(from = ?self.phase, to = ?next, "Run phase change");
        self.phase = next;
    }
}

impl std::fmt::Debug for RunAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunAdapter")
            .field("config", &self.config)
            .field("files", &self.files)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
