//! Module loader that settles from a fixed script.

use async_trait::async_trait;
use bddbridge_adapter::{AdapterError, AdapterResult, ModuleLoader};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Loads every module successfully unless told otherwise.
///
/// Loads can be delayed per URL to exercise out-of-order settling.
#[derive(Debug, Default)]
pub struct StaticModuleLoader {
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    loaded: Mutex<Vec<String>>,
}

impl StaticModuleLoader {
    /// Loader where everything succeeds immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading `url` fail
    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// Delay settling of `url`
    pub fn delayed(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// URLs in the order their loads settled
    pub fn settled(&self) -> Vec<String> {
        self.loaded.lock().clone()
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load_module(&self, url: &str) -> AdapterResult<()> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        self.loaded.lock().push(url.to_string());

        if self.failing.contains(url) {
            return Err(AdapterError::module_load(url, "script error"));
        }
        Ok(())
    }
}
