use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// A symbolic request for a relative date window.
///
/// Serialized as the token the dashboard uses (`"7D"`, `"ALL"`, ...).
/// Deserialization goes through [`FromStr`], so any letter case is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[default]
    #[serde(rename = "7D")]
    SevenDays,
    #[serde(rename = "30D")]
    ThirtyDays,
    #[serde(rename = "90D")]
    NinetyDays,
    #[serde(rename = "ALL")]
    All,
}

impl Timeframe {
    /// Every supported timeframe, shortest window first.
    pub const ALL_TIMEFRAMES: [Timeframe; 5] = [
        Timeframe::OneDay,
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
        Timeframe::NinetyDays,
        Timeframe::All,
    ];

    /// Number of calendar days in the window, end date included.
    /// `None` for `ALL`, which spans every available date.
    pub fn days(&self) -> Option<i64> {
        match self {
            Timeframe::OneDay => Some(1),
            Timeframe::SevenDays => Some(7),
            Timeframe::ThirtyDays => Some(30),
            Timeframe::NinetyDays => Some(90),
            Timeframe::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::SevenDays => "7D",
            Timeframe::ThirtyDays => "30D",
            Timeframe::NinetyDays => "90D",
            Timeframe::All => "ALL",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    /// Case-insensitive. Anything outside the five tokens is rejected,
    /// there is no fallback window.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_uppercase().as_str() {
            "1D" => Ok(Timeframe::OneDay),
            "7D" => Ok(Timeframe::SevenDays),
            "30D" => Ok(Timeframe::ThirtyDays),
            "90D" => Ok(Timeframe::NinetyDays),
            "ALL" => Ok(Timeframe::All),
            _ => Err(CoreError::UnsupportedTimeframe(token.to_string())),
        }
    }
}

impl TryFrom<String> for Timeframe {
    type Error = CoreError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

/// A concrete `[start_date, end_date]` window for a timeframe.
///
/// Either both bounds are set with `start_date <= end_date`, or both are
/// `None` (no snapshot dates were available).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub timeframe: Timeframe,
}

impl TimeframeRange {
    pub fn empty(timeframe: Timeframe) -> Self {
        Self {
            start_date: None,
            end_date: None,
            timeframe,
        }
    }

    /// Both bounds, or `None` for an empty range.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds().is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| date >= start && date <= end)
    }

    /// Number of calendar days covered, both ends included.
    pub fn day_count(&self) -> usize {
        self.bounds()
            .map(|(start, end)| (end - start).num_days() as usize + 1)
            .unwrap_or(0)
    }
}
