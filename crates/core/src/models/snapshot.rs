use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One account's holding of one asset, valued in USD, as of a snapshot date.
///
/// Produced by the snapshot normalizer and consumed during aggregation;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRow {
    pub date: NaiveDate,
    pub account_id: String,
    pub asset_id: String,
    pub value_usd: f64,
}

impl ValuationRow {
    pub fn new(
        date: NaiveDate,
        account_id: impl Into<String>,
        asset_id: impl Into<String>,
        value_usd: f64,
    ) -> Self {
        Self {
            date,
            account_id: account_id.into(),
            asset_id: asset_id.into(),
            value_usd,
        }
    }

    pub fn key(&self) -> LatestValueKey {
        LatestValueKey::new(&self.account_id, &self.asset_id)
    }
}

/// Composite `(account, asset)` key the aggregator tracks values under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatestValueKey {
    pub account_id: String,
    pub asset_id: String,
}

impl LatestValueKey {
    pub fn new(account_id: impl Into<String>, asset_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            asset_id: asset_id.into(),
        }
    }
}

impl std::fmt::Display for LatestValueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.account_id, self.asset_id)
    }
}
