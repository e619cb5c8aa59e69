use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::CoreError;

use super::timeframe::Timeframe;

/// Where snapshots and fixture datasets are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// Local directories (native only).
    Directory {
        /// Holds one `YYYY-MM-DD.json` per day, optionally an `index.json`
        snapshots_dir: PathBuf,
        /// Holds `accounts.json`, `assets.json`, ...
        datasets_dir: PathBuf,
    },
    /// Static files served over HTTP.
    Http {
        snapshots_url: String,
        datasets_url: String,
    },
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        DataSourceConfig::Directory {
            snapshots_dir: PathBuf::from("data/account_assets_daily"),
            datasets_dir: PathBuf::from("mock-data/data"),
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data_source: DataSourceConfig,

    /// Timeframe shown before the user picks one
    #[serde(default)]
    pub default_timeframe: Timeframe,

    /// How many rows the autotrader leaderboard keeps
    #[serde(default = "default_top_autotraders")]
    pub top_autotraders: usize,

    /// How many rows the recent trades table keeps
    #[serde(default = "default_trade_history_limit")]
    pub trade_history_limit: usize,

    /// Quote side of the pair labels (e.g., "BTC / USDT")
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
}

fn default_top_autotraders() -> usize {
    3
}

fn default_trade_history_limit() -> usize {
    10
}

fn default_quote_asset() -> String {
    "USDT".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_source: DataSourceConfig::default(),
            default_timeframe: Timeframe::default(),
            top_autotraders: default_top_autotraders(),
            trade_history_limit: default_trade_history_limit(),
            quote_asset: default_quote_asset(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document. Missing fields
    /// take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.top_autotraders == 0 {
            return Err(CoreError::ValidationError(
                "top_autotraders must be at least 1".into(),
            ));
        }
        if self.trade_history_limit == 0 {
            return Err(CoreError::ValidationError(
                "trade_history_limit must be at least 1".into(),
            ));
        }
        if self.quote_asset.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "quote_asset must not be empty".into(),
            ));
        }
        match &self.data_source {
            DataSourceConfig::Directory {
                snapshots_dir,
                datasets_dir,
            } => {
                if snapshots_dir.as_os_str().is_empty() || datasets_dir.as_os_str().is_empty() {
                    return Err(CoreError::ValidationError(
                        "directory data source needs both snapshots_dir and datasets_dir".into(),
                    ));
                }
            }
            DataSourceConfig::Http {
                snapshots_url,
                datasets_url,
            } => {
                for url in [snapshots_url, datasets_url] {
                    if !(url.starts_with("http://") || url.starts_with("https://")) {
                        return Err(CoreError::ValidationError(format!(
                            "'{url}' is not an http(s) URL"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
