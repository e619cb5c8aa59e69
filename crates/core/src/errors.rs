use chrono::NaiveDate;
use thiserror::Error;

use crate::models::dataset::Dataset;

/// Unified error type for the entire tradedash-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Request validation ──────────────────────────────────────────
    #[error("Unsupported timeframe: {0}")]
    UnsupportedTimeframe(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Snapshot store ──────────────────────────────────────────────
    #[error("No snapshot available for {0}")]
    SnapshotNotFound(NaiveDate),

    #[error("Failed to read snapshot for {date}: {message}")]
    SnapshotRead { date: NaiveDate, message: String },

    // ── Datasets ────────────────────────────────────────────────────
    #[error("Failed to read dataset {dataset}: {message}")]
    DatasetRead { dataset: Dataset, message: String },

    // ── Transport ───────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Attach a snapshot date to a transport-level failure.
    ///
    /// `SnapshotNotFound` and `SnapshotRead` pass through unchanged.
    pub fn for_snapshot(self, date: NaiveDate) -> Self {
        match self {
            CoreError::SnapshotNotFound(_) | CoreError::SnapshotRead { .. } => self,
            other => CoreError::SnapshotRead {
                date,
                message: other.to_string(),
            },
        }
    }

    /// Attach a dataset name to a transport-level failure.
    pub fn for_dataset(self, dataset: Dataset) -> Self {
        match self {
            CoreError::DatasetRead { .. } => self,
            other => CoreError::DatasetRead {
                dataset,
                message: other.to_string(),
            },
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters: signed fixture URLs carry tokens there.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
