use chrono::NaiveDate;
use serde_json::Value;

/// Name of the optional file listing every snapshot file of a directory.
pub const INDEX_FILE: &str = "index.json";

const DATE_LEN: usize = "YYYY-MM-DD".len();

/// Extract the snapshot date from a file name ending in `YYYY-MM-DD.json`.
///
/// Any prefix is allowed (`snapshot-2024-01-01.json`); `index.json` and
/// anything that is not a real calendar date yield `None`.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(".json")?;
    if stem.len() < DATE_LEN || !stem.is_char_boundary(stem.len() - DATE_LEN) {
        return None;
    }
    parse_iso_date(&stem[stem.len() - DATE_LEN..])
}

/// Parse a strict `YYYY-MM-DD` date: ten bytes, zero-padded, dashes at
/// offsets 4 and 7, and a real calendar day.
pub fn parse_iso_date(candidate: &str) -> Option<NaiveDate> {
    let bytes = candidate.as_bytes();
    if bytes.len() != DATE_LEN {
        return None;
    }
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()
}

/// Dates listed by an `index.json` document (an array of file names).
/// Entries that are not strings or not dated file names are skipped.
pub fn dates_from_index(index: &Value) -> Vec<NaiveDate> {
    index
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .filter_map(date_from_file_name)
                .collect()
        })
        .unwrap_or_default()
}

/// Dates linked from an HTML directory listing (`<a href="2024-01-01.json">`).
/// Link targets may carry a path; only the last segment is matched.
pub fn dates_from_listing(html: &str) -> Vec<NaiveDate> {
    html.split("href=")
        .skip(1)
        .filter_map(|rest| {
            let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
            let target = rest[1..].split(quote).next()?;
            let name = target.rsplit('/').next()?;
            date_from_file_name(name)
        })
        .collect()
}

/// File name of the snapshot for a date.
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("{}.json", date.format("%Y-%m-%d"))
}
