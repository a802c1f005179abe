// BDD runner for the bridge: every feature file under features/

mod steps;

use bddbridge_bdd_tests::features_dir;
use bddbridge_test_utils::bdd::run_features;

#[tokio::main]
async fn main() {
    let features_dir = features_dir();
    assert!(features_dir.exists(), "Features directory not found: {:?}", features_dir);

    run_features(&features_dir).await;
}
