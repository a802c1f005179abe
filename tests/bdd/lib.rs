//! Shared paths for the bridge's BDD suite

use std::path::{Path, PathBuf};

/// Directory holding the suite's `.feature` files
pub fn features_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("features")
}
