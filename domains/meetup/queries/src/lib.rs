pub mod filter;
pub mod window;

use serde::Deserialize;
use utoipa::IntoParams;

pub use filter::{filter_by_keyword, filter_by_window, normalize_keyword};
pub use window::{DEFAULT_TIMEZONE, TimeWindow, parse_timezone};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct KeywordQuery {
    /// Case-insensitive substring of the event name; empty matches all.
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DayQuery {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TimeRangeQuery {
    /// Upstream range, e.g. `1710478800000,1710565200000` or `-1w,1w`.
    pub timerange: String,
    /// Comma-separated group url-names.
    pub groups: Option<String>,
}

impl TimeRangeQuery {
    pub fn group_list(&self) -> Vec<String> {
        self.groups
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SlackQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub trigger_word: String,
}

impl SlackQuery {
    /// The message text with the trigger word removed.
    pub fn keyword(&self) -> String {
        if self.trigger_word.is_empty() {
            self.text.clone()
        }
        else {
            self.text.replace(&self.trigger_word, "")
        }
    }
}
