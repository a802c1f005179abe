//! BDD testing utilities for the bridge
//!
//! This module provides the cucumber-rs world. Step definitions live with
//! the test binary that runs them.

mod world;
pub use world::*;

use cucumber::World;
use std::path::Path;

/// Run every feature file under `features_dir`, exiting non-zero on failure
pub async fn run_features(features_dir: &Path) {
    BridgeWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit(features_dir)
        .await;
}
