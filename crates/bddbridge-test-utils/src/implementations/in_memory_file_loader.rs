//! In-memory implementation of the FileLoader trait.

use bddbridge_adapter::{AdapterError, AdapterResult, FileLoader};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// File server backed by a map of URL to text.
///
/// Unknown URLs fail the way a 404 would.
#[derive(Default)]
pub struct InMemoryFileLoader {
    files: RwLock<HashMap<String, String>>,
    fetches: AtomicUsize,
}

impl fmt::Debug for InMemoryFileLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryFileLoader")
            .field("file_count", &self.files.read().len())
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

impl InMemoryFileLoader {
    /// Creates an empty file server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` at `url`.
    pub fn insert(&self, url: impl Into<String>, text: impl Into<String>) {
        self.files.write().insert(url.into(), text.into());
    }

    /// Builder form of [`InMemoryFileLoader::insert`].
    pub fn with_file(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(url, text);
        self
    }

    /// Number of `load` calls, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl FileLoader for InMemoryFileLoader {
    fn load(&self, url: &str) -> AdapterResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.files
            .read()
            .get(url)
            .cloned()
            .ok_or_else(|| AdapterError::file_load(url, "404 Not Found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_inserted_files() {
        let loader = InMemoryFileLoader::new().with_file("/base/a.feature", "Feature: A");

        assert_eq!(loader.load("/base/a.feature").unwrap(), "Feature: A");
        assert!(matches!(
            loader.load("/base/b.feature"),
            Err(AdapterError::FileLoad { .. })
        ));
        assert_eq!(loader.fetch_count(), 2);
    }
}
