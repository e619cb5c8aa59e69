pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, NaiveDate, Utc};
use models::{
    analytics::{AccountDistribution, AccountSummary, DashboardOverview},
    autotrader::{AccountAutotrader, AutotraderMetrics, LeaderboardEntry},
    cache::DatasetCache,
    dataset::{Account, AccountAsset, AssetInfo, Autotrader, Dataset, Trade, TradingPlan},
    series::{AssetSummary, EquitySeriesPoint},
    settings::{DataSourceConfig, Settings},
    timeframe::{Timeframe, TimeframeRange},
    trade::{TradeFilter, TradeHistoryRow},
};
use providers::http::HttpProvider;
use providers::traits::{DatasetSource, SnapshotStore};
use services::{
    account_service::AccountService,
    autotrader_service::AutotraderService,
    dataset_service::DatasetService,
    equity_service::EquityService,
    summary_service::SummaryService,
    timeframe::{normalize_dates, resolve_range},
    trade_service::{TradeContext, TradeService},
};

use errors::CoreError;

/// Main entry point for the dashboard core.
///
/// Owns the snapshot store, the dataset source, the session's dataset cache
/// and the settings. Every view is recomputed on request; only raw datasets
/// are cached, and only until [`TradingDashboard::clear_cache`] or
/// [`TradingDashboard::invalidate_dataset`] is called.
#[must_use]
pub struct TradingDashboard {
    snapshots: Box<dyn SnapshotStore>,
    datasets: Box<dyn DatasetSource>,
    cache: DatasetCache,
    settings: Settings,
    dataset_service: DatasetService,
    equity_service: EquityService,
    summary_service: SummaryService,
    account_service: AccountService,
    trade_service: TradeService,
    autotrader_service: AutotraderService,
}

impl std::fmt::Debug for TradingDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingDashboard")
            .field("snapshots", &self.snapshots.name())
            .field("datasets", &self.datasets.name())
            .field("cached_datasets", &self.cache.len())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Every dataset the account/trade/autotrader views join over.
struct Fixtures {
    accounts: Vec<Account>,
    assets: Vec<AssetInfo>,
    autotraders: Vec<Autotrader>,
    plans: Vec<TradingPlan>,
    trades: Vec<Trade>,
}

impl TradingDashboard {
    /// Build a dashboard over explicit collaborators.
    pub fn new(
        snapshots: Box<dyn SnapshotStore>,
        datasets: Box<dyn DatasetSource>,
        settings: Settings,
    ) -> Self {
        Self {
            snapshots,
            datasets,
            cache: DatasetCache::new(),
            settings,
            dataset_service: DatasetService::new(),
            equity_service: EquityService::new(),
            summary_service: SummaryService::new(),
            account_service: AccountService::new(),
            trade_service: TradeService::new(),
            autotrader_service: AutotraderService::new(),
        }
    }

    /// Validate the settings and build the providers they name.
    pub fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        match settings.data_source.clone() {
            #[cfg(not(target_arch = "wasm32"))]
            DataSourceConfig::Directory {
                snapshots_dir,
                datasets_dir,
            } => {
                let provider = providers::filesystem::FileSystemProvider::new(snapshots_dir, datasets_dir);
                Ok(Self::new(
                    Box::new(provider.clone()),
                    Box::new(provider),
                    settings,
                ))
            }
            #[cfg(target_arch = "wasm32")]
            DataSourceConfig::Directory { .. } => Err(CoreError::ValidationError(
                "directory data sources are not available in the browser".into(),
            )),
            DataSourceConfig::Http {
                snapshots_url,
                datasets_url,
            } => {
                let provider = HttpProvider::new(snapshots_url, datasets_url);
                Ok(Self::new(
                    Box::new(provider.clone()),
                    Box::new(provider),
                    settings,
                ))
            }
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Timeframes & Equity ─────────────────────────────────────────

    /// Every date with a snapshot, ascending and deduplicated.
    pub async fn available_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        Ok(normalize_dates(self.snapshots.list_available_dates().await?))
    }

    /// Resolve a timeframe token against the store's dates.
    pub async fn resolve_timeframe(&self, timeframe: &str) -> Result<TimeframeRange, CoreError> {
        let timeframe: Timeframe = timeframe.parse()?;
        let dates = self.available_dates().await?;
        Ok(resolve_range(timeframe, dates))
    }

    /// Dense total-equity series for a timeframe token.
    pub async fn equity_series(&self, timeframe: &str) -> Result<Vec<EquitySeriesPoint>, CoreError> {
        let timeframe: Timeframe = timeframe.parse()?;
        let dates = self.available_dates().await?;
        let range = resolve_range(timeframe, dates.iter().copied());
        Ok(self
            .equity_service
            .generate_equity_series(self.snapshots.as_ref(), &range, &dates)
            .await)
    }

    /// Total, % change and series for a timeframe token.
    pub async fn asset_summary(&self, timeframe: &str) -> Result<AssetSummary, CoreError> {
        self.summary_service
            .get_asset_summary(self.snapshots.as_ref(), timeframe)
            .await
    }

    /// Asset summary for the configured default timeframe.
    pub async fn default_asset_summary(&self) -> Result<AssetSummary, CoreError> {
        let timeframe = self.settings.default_timeframe;
        let dates = self.snapshots.list_available_dates().await?;
        Ok(self
            .summary_service
            .summarize(self.snapshots.as_ref(), timeframe, &dates)
            .await)
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Per-account totals and holdings.
    pub async fn accounts_with_summary(&mut self) -> Result<Vec<AccountSummary>, CoreError> {
        let accounts: Vec<Account> = self.load(Dataset::Accounts).await?;
        let positions: Vec<AccountAsset> = self.load(Dataset::AccountAssets).await?;
        let assets: Vec<AssetInfo> = self.load(Dataset::Assets).await?;
        let autotraders: Vec<Autotrader> = self.load(Dataset::Autotraders).await?;
        Ok(self
            .account_service
            .accounts_with_summary(&accounts, &positions, &assets, &autotraders))
    }

    /// Autotraders of one account, joined with their trading plans.
    pub async fn autotraders_by_account(
        &mut self,
        account_id: &str,
    ) -> Result<Vec<AccountAutotrader>, CoreError> {
        let autotraders: Vec<Autotrader> = self.load(Dataset::Autotraders).await?;
        let plans: Vec<TradingPlan> = self.load(Dataset::TradingPlans).await?;
        Ok(self
            .account_service
            .autotraders_by_account(account_id, &autotraders, &plans))
    }

    /// Total value split by exchange/provider.
    pub async fn account_distribution(&mut self) -> Result<AccountDistribution, CoreError> {
        let summaries = self.accounts_with_summary().await?;
        Ok(self.account_service.account_distribution(&summaries))
    }

    // ── Trades ──────────────────────────────────────────────────────

    /// Filtered trade history, newest first.
    pub async fn trade_history(&mut self, filter: &TradeFilter) -> Result<Vec<TradeHistoryRow>, CoreError> {
        let fixtures = self.load_fixtures().await?;
        Ok(self.history_rows(&fixtures, filter))
    }

    /// The newest trades, as many as `trade_history_limit` allows.
    pub async fn recent_trades(&mut self) -> Result<Vec<TradeHistoryRow>, CoreError> {
        let filter = TradeFilter::with_limit(self.settings.trade_history_limit);
        self.trade_history(&filter).await
    }

    // ── Autotraders ─────────────────────────────────────────────────

    /// Top autotraders by absolute pnl, as of `now`.
    pub async fn top_autotraders(&mut self, now: DateTime<Utc>) -> Result<Vec<LeaderboardEntry>, CoreError> {
        let fixtures = self.load_fixtures().await?;
        Ok(self.leaderboard(&fixtures, now))
    }

    /// Aggregate autotrader performance for a timeframe token, as of `now`.
    pub async fn autotrader_metrics(
        &mut self,
        timeframe: &str,
        now: DateTime<Utc>,
    ) -> Result<AutotraderMetrics, CoreError> {
        let timeframe: Timeframe = timeframe.parse()?;
        let fixtures = self.load_fixtures().await?;
        let rows = self.history_rows(&fixtures, &TradeFilter::new());
        Ok(self
            .autotrader_service
            .performance_metrics(&fixtures.autotraders, &rows, timeframe, now))
    }

    // ── Overview ────────────────────────────────────────────────────

    /// Every dashboard section for the default timeframe, as of `now`.
    pub async fn overview(&mut self, now: DateTime<Utc>) -> Result<DashboardOverview, CoreError> {
        let asset_summary = self.default_asset_summary().await?;
        let account_distribution = self.account_distribution().await?;
        let fixtures = self.load_fixtures().await?;
        let top_autotraders = self.leaderboard(&fixtures, now);
        let trade_history = self.history_rows(
            &fixtures,
            &TradeFilter::with_limit(self.settings.trade_history_limit),
        );

        Ok(DashboardOverview {
            asset_summary,
            account_distribution,
            top_autotraders,
            trade_history,
        })
    }

    // ── Cache Management ────────────────────────────────────────────

    /// Force the next read of `dataset` to hit the source.
    /// Returns `true` if it was cached.
    pub fn invalidate_dataset(&mut self, dataset: Dataset) -> bool {
        self.cache.invalidate(dataset)
    }

    /// Drop every cached dataset.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cached_dataset_count(&self) -> usize {
        self.cache.len()
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn load<T: serde::de::DeserializeOwned>(&mut self, dataset: Dataset) -> Result<Vec<T>, CoreError> {
        self.dataset_service
            .load(self.datasets.as_ref(), &mut self.cache, dataset)
            .await
    }

    async fn load_fixtures(&mut self) -> Result<Fixtures, CoreError> {
        Ok(Fixtures {
            accounts: self.load(Dataset::Accounts).await?,
            assets: self.load(Dataset::Assets).await?,
            autotraders: self.load(Dataset::Autotraders).await?,
            plans: self.load(Dataset::TradingPlans).await?,
            trades: self.load(Dataset::TradeHistory).await?,
        })
    }

    fn history_rows(&self, fixtures: &Fixtures, filter: &TradeFilter) -> Vec<TradeHistoryRow> {
        let context = TradeContext {
            accounts: &fixtures.accounts,
            assets: &fixtures.assets,
            autotraders: &fixtures.autotraders,
            plans: &fixtures.plans,
        };
        self.trade_service.trade_history(&fixtures.trades, context, filter)
    }

    fn leaderboard(&self, fixtures: &Fixtures, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        let rows = self.history_rows(fixtures, &TradeFilter::new());
        self.autotrader_service.leaderboard(
            &fixtures.autotraders,
            &fixtures.plans,
            &rows,
            &self.settings.quote_asset,
            now,
            self.settings.top_autotraders,
        )
    }
}
