use serde::{Deserialize, Serialize};

use super::autotrader::LeaderboardEntry;
use super::dataset::Account;
use super::series::AssetSummary;
use super::trade::TradeHistoryRow;

/// Summary of one account: its positions and their combined value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// The account record
    pub account: Account,

    /// Sum of all holdings' USD value
    pub total_value_usd: f64,

    /// Positions, largest USD value first
    pub holdings: Vec<HoldingSummary>,

    /// Number of autotraders attached to this account
    pub autotrader_count: usize,
}

/// One position inside an [`AccountSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingSummary {
    pub asset_id: String,

    /// Ticker joined from the assets fixture, if known
    pub symbol: Option<String>,

    /// Human-readable asset name, if known
    pub name: Option<String>,

    pub quantity: Option<f64>,

    pub usd_value: f64,

    /// This holding's value / account total × 100
    pub allocation_pct: f64,
}

/// How total value is spread over exchanges/providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDistribution {
    pub total_value_usd: f64,

    /// Pre-formatted total (e.g., "$21,240")
    pub total: String,

    /// Largest share first
    pub entries: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    /// Provider name, or the account id when the provider is unknown
    pub name: String,
    pub amount: f64,
    pub value: String,
    pub share_pct: f64,
}

/// Every dashboard section computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub asset_summary: AssetSummary,
    pub account_distribution: AccountDistribution,
    pub top_autotraders: Vec<LeaderboardEntry>,
    pub trade_history: Vec<TradeHistoryRow>,
}
