use chrono::{Days, NaiveDate};
use log::debug;

use crate::errors::CoreError;
use crate::models::timeframe::{Timeframe, TimeframeRange};
use crate::providers::index::parse_iso_date;

/// Parse a zero-padded `YYYY-MM-DD` snapshot date (surrounding whitespace
/// ignored). Short forms such as `2024-1-5` or `24-01-09` are rejected.
pub fn parse_snapshot_date(value: &str) -> Result<NaiveDate, CoreError> {
    parse_iso_date(value.trim()).ok_or_else(|| CoreError::InvalidDate(value.to_string()))
}

/// Sort ascending and drop duplicates.
pub fn normalize_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Parse, sort and deduplicate date strings; malformed entries are dropped.
pub fn normalize_date_strings<S: AsRef<str>>(dates: impl IntoIterator<Item = S>) -> Vec<NaiveDate> {
    normalize_dates(
        dates
            .into_iter()
            .filter_map(|d| parse_snapshot_date(d.as_ref()).ok()),
    )
}

/// Resolve a timeframe against the available snapshot dates.
///
/// The window is anchored on the latest available date. `ALL` starts at the
/// earliest date; an N-day window starts N-1 calendar days before the end,
/// whether or not those days have snapshots.
pub fn resolve_range(
    timeframe: Timeframe,
    dates: impl IntoIterator<Item = NaiveDate>,
) -> TimeframeRange {
    let dates = normalize_dates(dates);
    let (Some(&first), Some(&end)) = (dates.first(), dates.last()) else {
        return TimeframeRange::empty(timeframe);
    };

    let start = match timeframe.days() {
        None => first,
        Some(days) => end
            .checked_sub_days(Days::new((days - 1).max(0) as u64))
            .unwrap_or(NaiveDate::MIN),
    };

    debug!("resolved {timeframe} to {start}..={end}");
    TimeframeRange {
        start_date: Some(start),
        end_date: Some(end),
        timeframe,
    }
}

/// Resolve a raw timeframe token against raw date strings.
///
/// The token is matched case-insensitively and must be one of
/// `1D`, `7D`, `30D`, `90D`, `ALL`; anything else is an
/// `UnsupportedTimeframe` error. Unparseable dates are ignored.
pub fn resolve_timeframe<S: AsRef<str>>(
    timeframe: &str,
    dates: impl IntoIterator<Item = S>,
) -> Result<TimeframeRange, CoreError> {
    let timeframe: Timeframe = timeframe.parse()?;
    Ok(resolve_range(timeframe, normalize_date_strings(dates)))
}

/// Every calendar day from `start` to `end`, both included.
/// Empty when `start > end`.
pub fn calendar_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |day| *day <= end)
}
