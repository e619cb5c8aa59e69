use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The static fixture files the dashboard reads besides daily snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Accounts,
    Assets,
    AccountAssets,
    Autotraders,
    TradingPlans,
    TradeHistory,
}

impl Dataset {
    pub const ALL_DATASETS: [Dataset; 6] = [
        Dataset::Accounts,
        Dataset::Assets,
        Dataset::AccountAssets,
        Dataset::Autotraders,
        Dataset::TradingPlans,
        Dataset::TradeHistory,
    ];

    /// File name of the fixture relative to the datasets directory/URL.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Accounts => "accounts.json",
            Dataset::Assets => "assets.json",
            Dataset::AccountAssets => "account_assets.json",
            Dataset::Autotraders => "autotraders.json",
            Dataset::TradingPlans => "trading_plans.json",
            Dataset::TradeHistory => "trade_history.json",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::Accounts => write!(f, "accounts"),
            Dataset::Assets => write!(f, "assets"),
            Dataset::AccountAssets => write!(f, "account_assets"),
            Dataset::Autotraders => write!(f, "autotraders"),
            Dataset::TradingPlans => write!(f, "trading_plans"),
            Dataset::TradeHistory => write!(f, "trade_history"),
        }
    }
}

/// A brokerage / exchange account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(alias = "id")]
    pub account_id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Exchange or broker the account lives at (e.g., "Binance")
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default, alias = "account_number")]
    pub account_code: Option<String>,

    #[serde(default)]
    pub market_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            name: None,
            provider: None,
            account_code: None,
            market_type: None,
            status: None,
            created_at: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Label used when grouping accounts by exchange.
    pub fn display_name(&self) -> &str {
        self.provider.as_deref().unwrap_or(&self.account_id)
    }
}

/// Static description of a tradable asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    #[serde(alias = "id")]
    pub asset_id: String,

    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub asset_type: Option<String>,
}

impl AssetInfo {
    pub fn new(asset_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            symbol: Some(symbol.into()),
            name: None,
            asset_type: None,
        }
    }
}

/// Current position of one asset inside one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAsset {
    pub account_id: String,
    pub asset_id: String,

    /// Market value in USD
    #[serde(default, alias = "market_value")]
    pub usd_value: f64,

    #[serde(default)]
    pub quantity: Option<f64>,
}

impl AccountAsset {
    pub fn new(account_id: impl Into<String>, asset_id: impl Into<String>, usd_value: f64) -> Self {
        Self {
            account_id: account_id.into(),
            asset_id: asset_id.into(),
            usd_value,
            quantity: None,
        }
    }
}

/// The strategy configuration an autotrader runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPlan {
    #[serde(alias = "id")]
    pub plan_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub market_type: Option<String>,
}

/// An automated trading bot attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autotrader {
    #[serde(alias = "id")]
    pub autotrader_id: String,

    pub account_id: String,

    #[serde(default, alias = "trading_plan_id")]
    pub plan_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub is_running: Option<bool>,

    /// Lifecycle status string ("active", "paused", ...)
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub pnl_percent: f64,

    #[serde(default)]
    pub pnl_usd: f64,

    #[serde(default)]
    pub capital_usd: f64,

    #[serde(default)]
    pub win_rate: f64,
}

impl Autotrader {
    pub fn new(autotrader_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            autotrader_id: autotrader_id.into(),
            account_id: account_id.into(),
            plan_id: None,
            name: None,
            is_running: None,
            status: None,
            created_at: None,
            pnl_percent: 0.0,
            pnl_usd: 0.0,
            capital_usd: 0.0,
            win_rate: 0.0,
        }
    }

    /// An explicit `is_running` flag wins; otherwise an "active"/"running"
    /// status counts as running.
    pub fn is_running(&self) -> bool {
        match self.is_running {
            Some(flag) => flag,
            None => self.status.as_deref().is_some_and(|s| {
                s.eq_ignore_ascii_case("active") || s.eq_ignore_ascii_case("running")
            }),
        }
    }
}

/// Direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    #[serde(alias = "BUY", alias = "Buy")]
    Buy,
    #[serde(alias = "SELL", alias = "Sell")]
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A single executed trade from the trade history fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(alias = "id")]
    pub trade_id: String,

    pub account_id: String,

    #[serde(default)]
    pub autotrader_id: Option<String>,

    pub asset_id: String,

    pub side: TradeSide,

    /// "win" / "loss", when the trade is closed
    #[serde(default)]
    pub result: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    pub executed_at: DateTime<Utc>,

    #[serde(default, alias = "price")]
    pub price_usd: f64,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub pnl_usd: f64,
}

impl Trade {
    /// Notional value of the trade in USD.
    pub fn value_usd(&self) -> f64 {
        self.price_usd * self.quantity
    }
}
