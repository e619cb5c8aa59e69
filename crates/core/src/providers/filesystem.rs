use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::dataset::Dataset;
use super::index::{date_from_file_name, dates_from_index, snapshot_file_name, INDEX_FILE};
use super::traits::{DatasetSource, SnapshotStore};

/// Reads snapshots and datasets from local directories.
///
/// - Snapshot dates come from `index.json` when the snapshot directory has
///   one, otherwise from a directory listing.
/// - Datasets are read from `<datasets_dir>/<dataset file name>`.
#[derive(Debug, Clone)]
pub struct FileSystemProvider {
    snapshots_dir: PathBuf,
    datasets_dir: PathBuf,
}

impl FileSystemProvider {
    pub fn new(snapshots_dir: impl Into<PathBuf>, datasets_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots_dir: snapshots_dir.into(),
            datasets_dir: datasets_dir.into(),
        }
    }

    pub fn snapshots_dir(&self) -> &Path {
        &self.snapshots_dir
    }

    pub fn datasets_dir(&self) -> &Path {
        &self.datasets_dir
    }

    async fn read_json(path: &Path) -> Result<Value, CoreError> {
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn list_directory(&self) -> Result<Vec<NaiveDate>, CoreError> {
        let mut dates = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.snapshots_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(date) = entry.file_name().to_str().and_then(date_from_file_name) {
                dates.push(date);
            }
        }
        Ok(dates)
    }
}

#[async_trait]
impl SnapshotStore for FileSystemProvider {
    fn name(&self) -> &str {
        "FileSystem"
    }

    async fn list_available_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        let index_path = self.snapshots_dir.join(INDEX_FILE);
        if tokio::fs::try_exists(&index_path).await? {
            let index = Self::read_json(&index_path).await?;
            Ok(dates_from_index(&index))
        } else {
            self.list_directory().await
        }
    }

    async fn read_snapshot(&self, date: NaiveDate) -> Result<Value, CoreError> {
        let path = self.snapshots_dir.join(snapshot_file_name(date));
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CoreError::SnapshotNotFound(date));
            }
            Err(e) => return Err(CoreError::from(e).for_snapshot(date)),
        };
        serde_json::from_str(&contents).map_err(|e| CoreError::SnapshotRead {
            date,
            message: format!("invalid JSON in {}: {e}", path.display()),
        })
    }
}

#[async_trait]
impl DatasetSource for FileSystemProvider {
    fn name(&self) -> &str {
        "FileSystem"
    }

    async fn read_dataset(&self, dataset: Dataset) -> Result<Value, CoreError> {
        let path = self.datasets_dir.join(dataset.file_name());
        Self::read_json(&path)
            .await
            .map_err(|e| e.for_dataset(dataset))
    }
}
