use serde_json::Value;
use std::collections::HashMap;

use super::dataset::Dataset;

/// In-memory cache of raw fixture datasets, keyed by [`Dataset`].
///
/// Owned by whoever drives a dashboard session and passed by reference into
/// the dataset loader. Nothing is cached implicitly at module level; call
/// [`DatasetCache::invalidate`] or [`DatasetCache::clear`] to force a re-read.
#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    entries: HashMap<Dataset, Value>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached raw document for a dataset, if loaded.
    pub fn get(&self, dataset: Dataset) -> Option<&Value> {
        self.entries.get(&dataset)
    }

    /// Store (or replace) the raw document for a dataset.
    pub fn insert(&mut self, dataset: Dataset, value: Value) {
        self.entries.insert(dataset, value);
    }

    pub fn contains(&self, dataset: Dataset) -> bool {
        self.entries.contains_key(&dataset)
    }

    /// Drop one dataset. Returns `true` if it was cached.
    pub fn invalidate(&mut self, dataset: Dataset) -> bool {
        self.entries.remove(&dataset).is_some()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
