use bddbridge_core::TagExpressionCompiler;
use bddbridge_test_utils::bdd::BridgeWorld;
use cucumber::{given, then, when};

// Runner arguments are written space separated in feature files

#[given(expr = "the runner arguments {string}")]
fn given_runner_arguments(world: &mut BridgeWorld, args: String) {
    world.args = args.split_whitespace().map(str::to_string).collect();
}

#[given("no runner arguments")]
fn given_no_runner_arguments(world: &mut BridgeWorld) {
    world.args.clear();
}

#[when("the tag expression is compiled")]
fn when_tags_compiled(world: &mut BridgeWorld) {
    world.tag_expression = Some(TagExpressionCompiler.compile(&world.args));
}

#[then(expr = "the tag expression is {string}")]
fn then_tag_expression_is(world: &mut BridgeWorld, expected: String) {
    assert_eq!(world.tag_expression.as_deref(), Some(expected.as_str()));
}

#[then("the tag expression is empty")]
fn then_tag_expression_is_empty(world: &mut BridgeWorld) {
    assert_eq!(world.tag_expression.as_deref(), Some(""));
}
