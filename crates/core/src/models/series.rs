use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::timeframe::Timeframe;

/// Total equity across every account and asset on one calendar day.
///
/// The core computes these; the presentation layer only draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Headline numbers plus the dense series for one timeframe request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub timeframe: Timeframe,

    /// Value of the last point of `series`, 0 when there is no data
    pub total_value_usd: f64,

    /// `(last - first) / first * 100`, 0 when `first` is 0
    pub percentage_change: f64,

    /// One point per calendar day of the resolved range, ascending
    pub series: Vec<EquitySeriesPoint>,
}

impl AssetSummary {
    /// The zero-valued summary returned when no snapshot data exists.
    pub fn empty(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            total_value_usd: 0.0,
            percentage_change: 0.0,
            series: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.series.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.series.last().map(|p| p.date)
    }

    /// Texts for the summary header (`$12,430`, `+3.4%`, `vs last 7d`).
    pub fn display(&self) -> SummaryDisplay {
        SummaryDisplay {
            total_balance: crate::format::format_usd(self.total_value_usd),
            change: crate::format::format_signed_percent(self.percentage_change),
            change_label: change_label(self.timeframe),
        }
    }
}

/// Pre-formatted header texts for an [`AssetSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDisplay {
    pub total_balance: String,
    pub change: String,
    pub change_label: String,
}

fn change_label(timeframe: Timeframe) -> String {
    match timeframe {
        Timeframe::All => "vs all time".to_string(),
        other => format!("vs last {}", other.as_str().to_lowercase()),
    }
}
