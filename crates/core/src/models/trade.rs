use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dataset::TradeSide;

/// Criteria for a trade history query. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeFilter {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub autotrader_id: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub side: Option<TradeSide>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub market_type: Option<String>,

    /// Inclusive lower bound on `executed_at`
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `executed_at`
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,

    /// Keep only the newest `limit` rows; 0 means no limit
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TradeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A trade joined with its account, asset, autotrader and plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistoryRow {
    pub trade_id: String,
    pub account_id: String,
    pub autotrader_id: Option<String>,
    pub asset_id: String,

    pub asset_symbol: Option<String>,
    pub asset_name: Option<String>,

    /// Provider of the account (e.g., "Binance")
    pub account_name: Option<String>,
    pub account_code: Option<String>,

    /// Plan market type, else the account's
    pub market_type: Option<String>,
    pub trading_plan_name: Option<String>,

    pub side: TradeSide,
    pub result: Option<String>,
    pub status: Option<String>,
    pub executed_at: DateTime<Utc>,

    pub price_usd: f64,
    pub quantity: f64,

    /// price_usd × quantity
    pub value_usd: f64,
    pub pnl_usd: f64,
}

impl TradeHistoryRow {
    /// Symbol when known, else the raw asset id.
    pub fn pair_label(&self) -> &str {
        self.asset_symbol.as_deref().unwrap_or(&self.asset_id)
    }
}
