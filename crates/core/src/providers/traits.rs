use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::dataset::Dataset;

/// Source of daily account/asset valuation snapshots.
///
/// Implementations only fetch raw documents; shape coercion happens in the
/// snapshot normalizer so every store is parsed the same way.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SnapshotStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Every date that has a snapshot. Order and uniqueness are not
    /// guaranteed; callers normalize.
    async fn list_available_dates(&self) -> Result<Vec<NaiveDate>, CoreError>;

    /// Raw JSON document for one date.
    /// Fails with `SnapshotNotFound` when the date has no snapshot.
    async fn read_snapshot(&self, date: NaiveDate) -> Result<Value, CoreError>;
}

/// Source of the static fixture datasets (accounts, trades, ...).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DatasetSource: Send + Sync {
    fn name(&self) -> &str;

    /// Raw JSON document of one dataset (normally an array of records).
    async fn read_dataset(&self, dataset: Dataset) -> Result<Value, CoreError>;
}
