use serde::{Deserialize, Serialize};

use super::dataset::{Autotrader, TradingPlan};
use super::timeframe::Timeframe;

/// One row of the "top autotraders" widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub autotrader_id: String,
    pub name: String,

    /// e.g. "BTC / USDT"
    pub pair: String,

    /// e.g. "Running 12d 4h"
    pub runtime: String,

    /// e.g. "+9.2%"
    pub pnl: String,

    pub pnl_percent: f64,
}

/// Aggregate performance of all autotraders over a timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutotraderMetrics {
    pub timeframe: Timeframe,

    /// Sum of realized pnl of trades in the window
    pub pnl: f64,

    /// pnl / capital × 100, 0 when no capital is allocated
    pub pnl_pct: f64,

    /// Sum of traded notional in USD
    pub volume: f64,

    pub trades: TradeCounts,

    /// Capital allocated across all autotraders
    pub capital: f64,

    /// Sum of positive pnl
    pub gross_profit: f64,

    /// Sum of |negative pnl|
    pub gross_loss: f64,

    pub active: usize,
    pub stopped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeCounts {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
}

/// An account's autotrader joined with its trading plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAutotrader {
    pub autotrader: Autotrader,

    /// `None` when the bot has no plan or the plan id is unknown
    pub trading_plan: Option<TradingPlan>,
    pub trading_plan_name: Option<String>,
    pub market_type: Option<String>,
}
