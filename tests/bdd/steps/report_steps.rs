use bddbridge_reporter::Report;
use bddbridge_test_utils::bdd::{parse_status, BridgeWorld, REPORT_FILE};
use bddbridge_test_utils::StepResultBuilder;
use cucumber::{given, then, when};
use std::fs;

#[given(expr = "the reporter receives a {word} result for scenario {string} of feature {string}")]
fn reporter_receives(world: &mut BridgeWorld, status: String, scenario: String, feature: String) {
    let result = StepResultBuilder::new(&feature, &scenario)
        .status(parse_status(&status))
        .build();
    world.aggregator.on_spec_complete(&result);
}

#[when(expr = "the reporter receives a result with suite {string}")]
fn reporter_receives_suite(world: &mut BridgeWorld, suite: String) {
    world.report_snapshot = Some(world.aggregator.report().clone());
    let suite: Vec<&str> = if suite.is_empty() { Vec::new() } else { suite.split(';').map(str::trim).collect() };
    let result = StepResultBuilder::new("ignored", "ignored").suite(&suite).failed().build();
    world.aggregator.on_spec_complete(&result);
}

#[when("the run completes")]
fn when_run_completes(world: &mut BridgeWorld) {
    world.complete_report();
}

#[then("the report is unchanged")]
fn then_report_unchanged(world: &mut BridgeWorld) {
    let before = world.report_snapshot.as_ref().expect("no snapshot taken");
    assert_eq!(world.aggregator.report(), before);
}

#[then(expr = "the report marks feature {string} as {word}")]
fn then_feature_status(world: &mut BridgeWorld, feature: String, status: String) {
    assert_eq!(world.aggregator.report().feature_status(&feature), Some(parse_status(&status)));
}

#[then(expr = "the report marks scenario {string} of feature {string} as {word}")]
fn then_scenario_status(world: &mut BridgeWorld, scenario: String, feature: String, status: String) {
    assert_eq!(
        world.aggregator.report().scenario_status(&feature, &scenario),
        Some(parse_status(&status))
    );
}

#[then("the report is empty")]
fn then_report_empty(world: &mut BridgeWorld) {
    assert!(world.aggregator.report().is_empty());
}

#[then("the report file matches the report at completion")]
fn then_report_file_round_trips(world: &mut BridgeWorld) {
    let path = world.written_report.clone().expect("no report was written");
    assert_eq!(path, world.output_dir.path().join(REPORT_FILE));

    let text = fs::read_to_string(&path).expect("report file is readable");
    let parsed = Report::from_json_str(&text).expect("report file parses");
    if !parsed.is_empty() {
        assert!(text.contains("\n    \""), "report is not indented by four spaces");
    }
    assert_eq!(Some(&parsed), world.report_snapshot.as_ref());
}

#[then(expr = "the report file marks scenario {string} of feature {string} as {word}")]
fn then_report_file_scenario(world: &mut BridgeWorld, scenario: String, feature: String, status: String) {
    let path = world.written_report.clone().expect("no report was written");
    let text = fs::read_to_string(&path).expect("report file is readable");
    let value: serde_json::Value = serde_json::from_str(&text).expect("report file is JSON");

    assert_eq!(value[&feature]["scenarios"][&scenario], serde_json::json!(status));
}

#[then("no report file is written")]
fn then_no_report(world: &mut BridgeWorld) {
    assert!(world.written_report.is_none());
}
