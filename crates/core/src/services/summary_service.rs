use chrono::NaiveDate;
use log::debug;

use crate::errors::CoreError;
use crate::models::series::{AssetSummary, EquitySeriesPoint};
use crate::models::timeframe::Timeframe;
use crate::providers::traits::SnapshotStore;
use crate::services::equity_service::EquityService;
use crate::services::timeframe::{normalize_dates, resolve_range};

/// Produces the asset summary (total, % change, series) for a timeframe.
pub struct SummaryService {
    equity_service: EquityService,
}

impl SummaryService {
    pub fn new() -> Self {
        Self {
            equity_service: EquityService::new(),
        }
    }

    /// Full pipeline for one request: parse the token, list the store's
    /// dates, resolve the window, aggregate, summarize.
    ///
    /// Only an unsupported token or a failure to list dates is an error;
    /// no data yields the zero summary.
    pub async fn get_asset_summary(
        &self,
        store: &dyn SnapshotStore,
        timeframe: &str,
    ) -> Result<AssetSummary, CoreError> {
        let timeframe: Timeframe = timeframe.parse()?;
        let available = store.list_available_dates().await?;
        Ok(self.summarize(store, timeframe, &available).await)
    }

    /// Summarize a timeframe given the dates the store has. Never fails:
    /// unreadable snapshots count as missing days and no data yields the
    /// zero summary.
    pub async fn summarize(
        &self,
        store: &dyn SnapshotStore,
        timeframe: Timeframe,
        available_dates: &[NaiveDate],
    ) -> AssetSummary {
        let available = normalize_dates(available_dates.iter().copied());
        let range = resolve_range(timeframe, available.iter().copied());

        if range.is_empty() {
            debug!("no snapshot dates available for {timeframe}");
            return AssetSummary::empty(timeframe);
        }

        let series = self
            .equity_service
            .generate_equity_series(store, &range, &available)
            .await;

        self.build_summary(timeframe, series)
    }

    /// Summarize an already aggregated series.
    pub fn build_summary(&self, timeframe: Timeframe, series: Vec<EquitySeriesPoint>) -> AssetSummary {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.value, last.value),
            _ => return AssetSummary::empty(timeframe),
        };

        AssetSummary {
            timeframe,
            total_value_usd: last,
            percentage_change: percentage_change(first, last),
            series,
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

/// `(last - first) / first * 100`, floored to 0 when `first` is 0 so the
/// result is never infinite or NaN.
pub fn percentage_change(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    let pct = (last - first) / first * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}
