use bddbridge_core::StatusValue;
use bddbridge_reporter::{Report, ReportAggregator, ReporterConfig};
use bddbridge_test_utils::data_generators::StepResultBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn aggregator_writing_to(dir: &TempDir, file: &str) -> ReportAggregator {
    ReportAggregator::new(ReporterConfig::with_output(dir.path(), file))
}

#[test]
fn test_written_report_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut aggregator = aggregator_writing_to(&dir, "report.json");

    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").passed().build());
    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "locked user").failed().build());
    aggregator.on_spec_complete(&StepResultBuilder::new("Search", "by name").pending().build());
    let expected = aggregator.report().clone();

    let path = aggregator.on_run_complete().expect("report should be written");
    let parsed = Report::from_json_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(parsed, expected);
    assert!(aggregator.report().is_empty());
}

#[test]
fn test_written_json_shape_and_indent() {
    let dir = TempDir::new().unwrap();
    let mut aggregator = aggregator_writing_to(&dir, "report.json");

    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").passed().build());
    let path = aggregator.on_run_complete().unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert!(text.contains("\n    \"Login\": {"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!({
            "Login": {
                "featureStatus": "passed",
                "scenarios": { "valid user": "passed" }
            }
        })
    );
}

#[test]
fn test_nested_output_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let mut aggregator = aggregator_writing_to(&dir, r"reports\bdd\result.json");

    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").passed().build());
    let path = aggregator.on_run_complete().unwrap();

    assert_eq!(path, dir.path().join("reports/bdd/result.json"));
    assert!(path.is_file());
}

#[test]
fn test_existing_file_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("report.json");
    fs::write(&target, "stale content that is not json").unwrap();

    let mut aggregator = aggregator_writing_to(&dir, "report.json");
    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").pending().build());
    aggregator.on_run_complete().unwrap();

    let parsed = Report::from_json_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(parsed.feature_status("Login"), Some(StatusValue::Pending));
}

#[test]
fn test_write_failure_still_resets_report() {
    let dir = TempDir::new().unwrap();
    // A regular file where the output directory should be
    fs::write(dir.path().join("blocked"), "").unwrap();

    let mut aggregator = aggregator_writing_to(&dir, "blocked/report.json");
    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").passed().build());

    assert_eq!(aggregator.on_run_complete(), None);
    assert!(aggregator.report().is_empty());

    // The next run is unaffected
    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").failed().build());
    assert_eq!(aggregator.report().feature_status("Login"), Some(StatusValue::Failed));
}

#[test]
fn test_each_run_starts_empty() {
    let dir = TempDir::new().unwrap();
    let mut aggregator = aggregator_writing_to(&dir, "report.json");

    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").failed().build());
    aggregator.on_run_complete().unwrap();

    aggregator.on_spec_complete(&StepResultBuilder::new("Login", "valid user").passed().build());
    let path = aggregator.on_run_complete().unwrap();
    let parsed = Report::from_json_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(parsed.scenario_status("Login", "valid user"), Some(StatusValue::Passed));
}

#[test]
fn test_failed_is_sticky_across_result_sequences() {
    let sequences: [&[StatusValue]; 4] = [
        &[StatusValue::Failed, StatusValue::Passed],
        &[StatusValue::Passed, StatusValue::Failed, StatusValue::Pending],
        &[StatusValue::Pending, StatusValue::Failed, StatusValue::Passed, StatusValue::Passed],
        &[StatusValue::Failed, StatusValue::Pending, StatusValue::Failed],
    ];

    for sequence in sequences {
        let mut aggregator = ReportAggregator::default();
        for status in sequence {
            let result = StepResultBuilder::new("Login", "valid user").status(*status).build();
            aggregator.on_spec_complete(&result);
        }

        assert_eq!(
            aggregator.report().scenario_status("Login", "valid user"),
            Some(StatusValue::Failed),
            "sequence {:?}",
            sequence
        );
    }
}
