use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::errors::CoreError;
use crate::models::dataset::Dataset;
use super::traits::{DatasetSource, SnapshotStore};

/// Holds snapshot and dataset documents in memory.
///
/// For hosts that already have the fixtures loaded (e.g. a browser bundle)
/// and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    snapshots: BTreeMap<NaiveDate, Value>,
    datasets: HashMap<Dataset, Value>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add (or replace) the snapshot for a date.
    pub fn with_snapshot(mut self, date: NaiveDate, document: Value) -> Self {
        self.insert_snapshot(date, document);
        self
    }

    /// Builder-style: add (or replace) a dataset document.
    pub fn with_dataset(mut self, dataset: Dataset, document: Value) -> Self {
        self.insert_dataset(dataset, document);
        self
    }

    pub fn insert_snapshot(&mut self, date: NaiveDate, document: Value) {
        self.snapshots.insert(date, document);
    }

    pub fn insert_dataset(&mut self, dataset: Dataset, document: Value) {
        self.datasets.insert(dataset, document);
    }

    pub fn remove_snapshot(&mut self, date: NaiveDate) -> Option<Value> {
        self.snapshots.remove(&date)
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SnapshotStore for InMemoryProvider {
    fn name(&self) -> &str {
        "InMemory"
    }

    async fn list_available_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        Ok(self.snapshots.keys().copied().collect())
    }

    async fn read_snapshot(&self, date: NaiveDate) -> Result<Value, CoreError> {
        self.snapshots
            .get(&date)
            .cloned()
            .ok_or(CoreError::SnapshotNotFound(date))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DatasetSource for InMemoryProvider {
    fn name(&self) -> &str {
        "InMemory"
    }

    async fn read_dataset(&self, dataset: Dataset) -> Result<Value, CoreError> {
        self.datasets
            .get(&dataset)
            .cloned()
            .ok_or_else(|| CoreError::DatasetRead {
                dataset,
                message: "dataset not loaded".into(),
            })
    }
}
