use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::cache::DatasetCache;
use crate::models::dataset::Dataset;
use crate::providers::traits::DatasetSource;

/// Loads fixture datasets through a caller-owned [`DatasetCache`].
///
/// Cache strategy:
/// - **Hit**: decode from the cached raw document, no I/O.
/// - **Miss**: read from the source, cache the raw document, decode.
/// - Every call returns freshly decoded records, so callers may mutate
///   what they get without touching the cache.
pub struct DatasetService;

impl DatasetService {
    pub fn new() -> Self {
        Self
    }

    /// Raw document of a dataset, from cache when possible.
    pub async fn load_raw(
        &self,
        source: &dyn DatasetSource,
        cache: &mut DatasetCache,
        dataset: Dataset,
    ) -> Result<Value, CoreError> {
        if let Some(cached) = cache.get(dataset) {
            debug!("dataset {dataset} served from cache");
            return Ok(cached.clone());
        }

        debug!("dataset {dataset} not cached, reading from {}", source.name());
        let document = source.read_dataset(dataset).await?;
        if !document.is_array() {
            return Err(CoreError::DatasetRead {
                dataset,
                message: "expected a JSON array of records".into(),
            });
        }
        cache.insert(dataset, document.clone());
        Ok(document)
    }

    /// Typed records of a dataset. Entries that fail to decode are skipped
    /// with a warning instead of failing the whole dataset.
    pub async fn load<T: DeserializeOwned>(
        &self,
        source: &dyn DatasetSource,
        cache: &mut DatasetCache,
        dataset: Dataset,
    ) -> Result<Vec<T>, CoreError> {
        let document = self.load_raw(source, cache, dataset).await?;
        Ok(decode_records(dataset, document))
    }
}

impl Default for DatasetService {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode each element of a JSON array independently.
pub fn decode_records<T: DeserializeOwned>(dataset: Dataset, document: Value) -> Vec<T> {
    let Value::Array(entries) = document else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;
    for entry in entries {
        match serde_json::from_value::<T>(entry) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                debug!("dropping malformed {dataset} entry: {e}");
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} malformed entries in dataset {dataset}");
    }
    records
}
