use bddbridge::adapter::{AdapterConfig, HostManifest, RunAdapter, RunnerSink};
use bddbridge::model::EngineStepStatus;
use bddbridge::reporter::{Report, ReportAggregator, ReporterConfig};
use bddbridge::{replay_results, ReportingSink, StatusValue};
use bddbridge_test_utils::data_generators::create_login_feature;
use bddbridge_test_utils::{FeatureBuilder, ScriptedEngine, StepResultBuilder, TestHarness};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_adapter_results_flow_into_written_report() {
    let dir = TempDir::new().unwrap();
    let engine = ScriptedEngine::new().with_step_status("is locked", EngineStepStatus::Pending);
    let harness = TestHarness::new().with_engine(engine);
    harness.files.insert("/base/features/login.feature", create_login_feature());
    harness.files.insert(
        "/base/features/account.feature",
        FeatureBuilder::new("Account")
            .scenario("open", &["Given a new customer"])
            .scenario("locked", &["Given the account is locked", "Then nothing happens"])
            .build(),
    );

    let sink = Arc::new(
        ReportingSink::new(ReportAggregator::new(ReporterConfig::with_output(dir.path(), "out/bdd.json")))
            .forwarding_to(harness.sink.clone()),
    );
    let mut context = harness.context();
    context.sink = sink.clone() as Arc<dyn RunnerSink>;

    let manifest: HostManifest = ["/base/features/login.feature", "/base/features/account.feature"]
        .into_iter()
        .collect();
    let mut adapter = RunAdapter::new(AdapterConfig::default(), context);
    adapter.start(&manifest).await;

    let path = sink.written_report().expect("report should be written");
    assert_eq!(path, dir.path().join("out/bdd.json"));

    let report = Report::from_json_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report.feature_status("Login"), Some(StatusValue::Passed));
    assert_eq!(report.scenario_status("Account", "open"), Some(StatusValue::Passed));
    assert_eq!(report.scenario_status("Account", "locked"), Some(StatusValue::Pending));
    assert_eq!(report.feature_status("Account"), Some(StatusValue::Pending));

    // Results were forwarded to the runner as well
    assert_eq!(harness.sink.results().len(), 4);
    assert!(sink.report().is_empty());
}

#[test]
fn test_replayed_results_match_live_aggregation() {
    let results = vec![
        StepResultBuilder::new("Login", "valid user").passed().build(),
        StepResultBuilder::new("Login", "locked user").failed().build(),
        StepResultBuilder::new("Login", "locked user").passed().build(),
        StepResultBuilder::new("Search", "by name").pending().build(),
    ];

    let mut live = ReportAggregator::default();
    for result in &results {
        live.on_spec_complete(result);
    }

    let recorded: String = results
        .iter()
        .map(|result| serde_json::to_string(result).unwrap() + "\n")
        .collect();
    let mut replayed = ReportAggregator::default();
    let stats = replay_results(Cursor::new(recorded), &mut replayed).unwrap();

    assert_eq!(stats.recorded, 4);
    assert_eq!(replayed.report(), live.report());
    assert_eq!(
        replayed.report().scenario_status("Login", "locked user"),
        Some(StatusValue::Failed)
    );
}
