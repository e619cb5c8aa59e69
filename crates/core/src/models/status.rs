use serde::{Deserialize, Serialize};

use super::series::AssetSummary;

/// Lifecycle of one dashboard section, as the presentation layer sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    #[default]
    Idle,
    Loading,
    Error,
    Empty,
    Ready,
}

impl SectionStatus {
    /// `Ready` when the summary has at least one series point, else `Empty`.
    pub fn for_summary(summary: &AssetSummary) -> Self {
        if summary.has_data() {
            SectionStatus::Ready
        } else {
            SectionStatus::Empty
        }
    }

    /// Status for a list-shaped section (trade history, leaderboard, ...).
    pub fn for_items(len: usize) -> Self {
        if len == 0 {
            SectionStatus::Empty
        } else {
            SectionStatus::Ready
        }
    }

    /// Status of a finished load: errors map to `Error`.
    pub fn from_result<T, E>(result: &Result<T, E>, is_empty: impl Fn(&T) -> bool) -> Self {
        match result {
            Ok(value) if is_empty(value) => SectionStatus::Empty,
            Ok(_) => SectionStatus::Ready,
            Err(_) => SectionStatus::Error,
        }
    }

    /// Placeholder text shown instead of data, `None` once ready.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            SectionStatus::Idle | SectionStatus::Loading => Some("Loading..."),
            SectionStatus::Error => Some("Unable to load"),
            SectionStatus::Empty => Some("No data available"),
            SectionStatus::Ready => None,
        }
    }
}

impl std::fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionStatus::Idle => write!(f, "idle"),
            SectionStatus::Loading => write!(f, "loading"),
            SectionStatus::Error => write!(f, "error"),
            SectionStatus::Empty => write!(f, "empty"),
            SectionStatus::Ready => write!(f, "ready"),
        }
    }
}
