use bddbridge_core::StatusValue;
use bddbridge_test_utils::bdd::{parse_engine_status, parse_status, BridgeWorld};
use cucumber::{given, then, when};

#[given(expr = "a feature file {string} for feature {string}")]
fn given_feature_file(world: &mut BridgeWorld, uri: String, name: String) {
    world.feature_mut(&uri, &name);
}

#[given(expr = "{string} has a scenario {string} with steps {string}")]
fn given_scenario(world: &mut BridgeWorld, uri: String, scenario: String, steps: String) {
    let steps: Vec<&str> = steps.split(';').map(str::trim).collect();
    let position = world
        .features
        .iter()
        .position(|(u, _)| *u == uri)
        .unwrap_or_else(|| panic!("Feature {} was not declared", uri));
    let feature = std::mem::take(&mut world.features[position].1);
    world.features[position].1 = feature.scenario(&scenario, &steps);
}

#[given(expr = "{string} has a scenario {string} tagged {string} with steps {string}")]
fn given_tagged_scenario(world: &mut BridgeWorld, uri: String, scenario: String, tags: String, steps: String) {
    let tags: Vec<&str> = tags.split_whitespace().collect();
    let steps: Vec<&str> = steps.split(';').map(str::trim).collect();
    let position = world
        .features
        .iter()
        .position(|(u, _)| *u == uri)
        .unwrap_or_else(|| panic!("Feature {} was not declared", uri));
    let feature = std::mem::take(&mut world.features[position].1);
    world.features[position].1 = feature.tagged_scenario(&tags, &scenario, &steps);
}

#[given(expr = "a step module {string}")]
fn given_step_module(world: &mut BridgeWorld, url: String) {
    world.step_modules.push(url);
}

#[given(expr = "a broken step module {string}")]
fn given_broken_step_module(world: &mut BridgeWorld, url: String) {
    world.failing_modules.push(url.clone());
    world.step_modules.push(url);
}

#[given(expr = "the engine reports steps containing {string} as {word}")]
fn given_step_status(world: &mut BridgeWorld, text: String, status: String) {
    world.step_statuses.push((text, parse_engine_status(&status)));
}

#[given(expr = "the engine rejects {string}")]
fn given_engine_rejects(world: &mut BridgeWorld, uri: String) {
    world.rejected_features.push(uri);
}

#[when("the run starts")]
async fn when_run_starts(world: &mut BridgeWorld) {
    world.run().await;
}

#[then(expr = "the runner is told to expect {int} step(s)")]
fn then_total_announced(world: &mut BridgeWorld, total: usize) {
    assert_eq!(world.harness.sink.announced_totals(), vec![total]);
}

#[then(expr = "{int} step result(s) is/are delivered")]
fn then_results_delivered(world: &mut BridgeWorld, count: usize) {
    assert_eq!(world.results().len(), count);
}

#[then("the run is completed")]
fn then_run_completed(world: &mut BridgeWorld) {
    assert!(world.harness.sink.completion().is_some(), "complete was never called");
}

#[then(expr = "step result {int} is {word}")]
fn then_result_status(world: &mut BridgeWorld, position: usize, status: String) {
    let results = world.results();
    let result = &results[position - 1];
    assert_eq!(StatusValue::of(result), parse_status(&status), "result {:?}", result);
}

#[then(expr = "step result {int} has success {word} and skipped {word}")]
fn then_result_flags(world: &mut BridgeWorld, position: usize, success: String, skipped: String) {
    let results = world.results();
    let result = &results[position - 1];
    assert_eq!(result.success.to_string(), success);
    assert_eq!(result.skipped.to_string(), skipped);
}

#[then(expr = "step result {int} has id {string}")]
fn then_result_id(world: &mut BridgeWorld, position: usize, id: String) {
    assert_eq!(world.results()[position - 1].id, id);
}

#[then(expr = "step result {int} logs {string}")]
fn then_result_logs(world: &mut BridgeWorld, position: usize, text: String) {
    let results = world.results();
    assert!(
        results[position - 1].log.iter().any(|line| line.contains(&text)),
        "log {:?} does not mention {}",
        results[position - 1].log,
        text
    );
}

#[then(expr = "the engine received the tag expression {string}")]
fn then_engine_tags(world: &mut BridgeWorld, expected: String) {
    let runs = world.harness.engine.runs();
    assert!(!runs.is_empty(), "engine never ran");
    assert!(runs.iter().all(|run| run.tag_expression == expected));
}

#[then(expr = "{int} feature run(s) was/were rejected")]
fn then_rejected(world: &mut BridgeWorld, count: usize) {
    let summary = world.summary.as_ref().expect("run has not started");
    assert_eq!(summary.rejected_features, count);
    assert_eq!(summary.completed_features, summary.total_features);
}
