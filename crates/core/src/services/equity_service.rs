use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::BTreeMap;

use crate::models::series::EquitySeriesPoint;
use crate::models::snapshot::{LatestValueKey, ValuationRow};
use crate::models::timeframe::TimeframeRange;
use crate::providers::traits::SnapshotStore;
use crate::services::normalizer::normalize_snapshot;
use crate::services::timeframe::calendar_days;

/// Normalized rows of every snapshot that loaded, by date.
pub type SnapshotRows = BTreeMap<NaiveDate, Vec<ValuationRow>>;

/// Builds the dense total-equity series for a resolved timeframe.
///
/// Loading fans out one read per snapshot date; folding is strictly
/// sequential in calendar order since carry-forward depends on it.
/// Each call builds its own key → value map, so concurrent requests for
/// different timeframes never share state.
pub struct EquityService;

impl EquityService {
    pub fn new() -> Self {
        Self
    }

    /// Load the snapshots inside `range` and aggregate them.
    ///
    /// `available_dates` is what the store listed; only the dates inside the
    /// range are read. A snapshot that fails to load is logged and treated as
    /// a day without a snapshot.
    pub async fn generate_equity_series(
        &self,
        store: &dyn SnapshotStore,
        range: &TimeframeRange,
        available_dates: &[NaiveDate],
    ) -> Vec<EquitySeriesPoint> {
        let snapshots = self.load_snapshots(store, range, available_dates).await;
        self.aggregate(range, &snapshots)
    }

    /// Read and normalize every available snapshot inside `range`.
    pub async fn load_snapshots(
        &self,
        store: &dyn SnapshotStore,
        range: &TimeframeRange,
        available_dates: &[NaiveDate],
    ) -> SnapshotRows {
        let mut dates: Vec<NaiveDate> = available_dates
            .iter()
            .copied()
            .filter(|d| range.contains(*d))
            .collect();
        dates.sort_unstable();
        dates.dedup();

        let reads = dates.iter().map(|&date| async move {
            (date, store.read_snapshot(date).await)
        });
        let results = join_all(reads).await;

        let mut snapshots = SnapshotRows::new();
        let mut failed = Vec::new();
        for (date, result) in results {
            match result {
                Ok(document) => {
                    snapshots.insert(date, normalize_snapshot(&document, date));
                }
                Err(e) => failed.push((date, e.to_string())),
            }
        }

        if !failed.is_empty() {
            log::warn!(
                "Skipped {} unreadable snapshots from {}: {:?}",
                failed.len(),
                store.name(),
                failed
            );
        }

        snapshots
    }

    /// Fold normalized snapshots into one point per calendar day of `range`.
    ///
    /// For each day (ascending): every row of that day's snapshot overwrites
    /// the value under its `(account, asset)` key, then the point's value is
    /// the sum of all values currently known. Keys are never removed, so
    /// values carry forward over days without a snapshot. Rows dated outside
    /// `range` are ignored. An empty range yields an empty series.
    pub fn aggregate(&self, range: &TimeframeRange, snapshots: &SnapshotRows) -> Vec<EquitySeriesPoint> {
        let Some((start, end)) = range.bounds() else {
            return Vec::new();
        };

        // Ordered map: the per-day sum is computed in the same order on every call
        let mut latest: BTreeMap<LatestValueKey, f64> = BTreeMap::new();
        let mut series = Vec::with_capacity(range.day_count());

        for day in calendar_days(start, end) {
            if let Some(rows) = snapshots.get(&day) {
                for row in rows {
                    latest.insert(row.key(), row.value_usd);
                }
            }

            series.push(EquitySeriesPoint {
                date: day,
                value: latest.values().sum(),
            });
        }

        series
    }

    /// Group loose rows by their date, preserving row order within a day.
    pub fn group_rows(rows: impl IntoIterator<Item = ValuationRow>) -> SnapshotRows {
        let mut grouped = SnapshotRows::new();
        for row in rows {
            grouped.entry(row.date).or_default().push(row);
        }
        grouped
    }
}

impl Default for EquityService {
    fn default() -> Self {
        Self::new()
    }
}
