//! URL keyed cache over a [`FileLoader`]

use bddbridge_core::FeatureSource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::collaborators::FileLoader;
use crate::error::AdapterResult;

/// Per-run file cache.
///
/// Each URL is fetched at most once between calls to [`FileCache::clear`];
/// later reads are served from memory.
pub struct FileCache {
    loader: Arc<dyn FileLoader>,
    entries: HashMap<String, String>,
}

impl FileCache {
    /// Create an empty cache over `loader`
    pub fn new(loader: Arc<dyn FileLoader>) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
        }
    }

    /// Text at `url`, fetching it on first use
    pub fn load(&mut self, url: &str) -> AdapterResult<&str> {
        if !self.entries.contains_key(url) {
            debug!(url, "Fetching file");
            let text = self.loader.load(url)?;
            self.entries.insert(url.to_string(), text);
        }

        Ok(self.entries.get(url).map(String::as_str).unwrap_or_default())
    }

    /// Load every URL as a feature source.
    ///
    /// URLs that fail to load are logged and left out of the result.
    pub fn load_test_files(&mut self, urls: &[String]) -> Vec<FeatureSource> {
        urls.iter()
            .filter_map(|url| match self.load(url) {
                Ok(text) => Some(FeatureSource::new(url.clone(), text)),
                Err(e) => {
                    warn!(url = %url, error = %e, "Skipping feature that failed to load");
                    None
                }
            })
            .collect()
    }

    /// Cached text, without fetching
    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    /// Whether `url` has been fetched
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Number of cached files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been fetched yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry so the next read fetches again
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for FileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCache")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
