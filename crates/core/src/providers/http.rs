use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::dataset::Dataset;
use super::index::{dates_from_index, dates_from_listing, snapshot_file_name, INDEX_FILE};
use super::traits::{DatasetSource, SnapshotStore};

/// Reads snapshots and datasets served as static JSON files over HTTP.
///
/// - **Dates**: `GET {snapshots_url}/index.json` (array of `YYYY-MM-DD.json`),
///   or the server's HTML directory listing at `GET {snapshots_url}/` when
///   there is no index
/// - **Snapshot**: `GET {snapshots_url}/{date}.json`
/// - **Dataset**: `GET {datasets_url}/{file}`
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    snapshots_url: String,
    datasets_url: String,
}

impl HttpProvider {
    pub fn new(snapshots_url: impl Into<String>, datasets_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            snapshots_url: trim_base(snapshots_url.into()),
            datasets_url: trim_base(datasets_url.into()),
        }
    }

    /// GET a URL. Returns `Ok(None)` on 404, an error on other failures.
    async fn get(&self, url: &str) -> Result<Option<reqwest::Response>, CoreError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CoreError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(Some(resp))
    }

    /// GET a URL and decode it as JSON. Returns `Ok(None)` on 404.
    async fn get_json(&self, url: &str) -> Result<Option<Value>, CoreError> {
        let Some(resp) = self.get(url).await? else {
            return Ok(None);
        };
        let body = resp.json::<Value>().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse JSON from {url}: {e}"))
        })?;
        Ok(Some(body))
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SnapshotStore for HttpProvider {
    fn name(&self) -> &str {
        "Http"
    }

    async fn list_available_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        let url = format!("{}/{INDEX_FILE}", self.snapshots_url);
        if let Some(index) = self.get_json(&url).await? {
            return Ok(dates_from_index(&index));
        }

        debug!("no {INDEX_FILE} at {url}, reading the directory listing");
        let listing_url = format!("{}/", self.snapshots_url);
        match self.get(&listing_url).await? {
            Some(resp) => {
                let html = resp.text().await?;
                Ok(dates_from_listing(&html))
            }
            None => Err(CoreError::Http {
                status: StatusCode::NOT_FOUND.as_u16(),
                url: listing_url,
            }),
        }
    }

    async fn read_snapshot(&self, date: NaiveDate) -> Result<Value, CoreError> {
        let url = format!("{}/{}", self.snapshots_url, snapshot_file_name(date));
        match self.get_json(&url).await {
            Ok(Some(doc)) => Ok(doc),
            Ok(None) => Err(CoreError::SnapshotNotFound(date)),
            Err(e) => Err(e.for_snapshot(date)),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DatasetSource for HttpProvider {
    fn name(&self) -> &str {
        "Http"
    }

    async fn read_dataset(&self, dataset: Dataset) -> Result<Value, CoreError> {
        let url = format!("{}/{}", self.datasets_url, dataset.file_name());
        match self.get_json(&url).await {
            Ok(Some(doc)) => Ok(doc),
            Ok(None) => Err(CoreError::DatasetRead {
                dataset,
                message: format!("{url} not found"),
            }),
            Err(e) => Err(e.for_dataset(dataset)),
        }
    }
}
