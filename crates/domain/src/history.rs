//! Call history — a bounded, newest-first record of placed calls.

use serde::{Deserialize, Deserializer, Serialize};

use crate::time::{self, Timestamp};

/// Maximum number of calls kept in the log.
pub const HISTORY_CAPACITY: usize = 10;

/// One placed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub service_name: String,
    pub number: String,
    /// Local clock time shown next to the entry, e.g. `03:07:45 PM`.
    #[serde(rename = "time")]
    pub display_time: String,
    /// Epoch milliseconds; strictly decreasing along the log.
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
}

impl HistoryItem {
    /// Build an item stamped at `at`, displayed in local time.
    #[must_use]
    pub fn new(service_name: impl Into<String>, number: impl Into<String>, at: Timestamp) -> Self {
        Self {
            service_name: service_name.into(),
            number: number.into(),
            display_time: time::display_time(at),
            timestamp_millis: time::to_millis(at),
        }
    }
}

/// Newest-first log holding at most [`HISTORY_CAPACITY`] items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistoryLog(Vec<HistoryItem>);

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `item`, evicting the oldest entries beyond capacity.
    ///
    /// The timestamp is bumped past the current newest entry when needed so
    /// ordering stays strict even for calls placed within the same millisecond
    /// or after a wall-clock step backwards.
    ///
    /// A newest entry stamped at the very end of the `i64` range cannot be
    /// outranked; the log is reset and `item` keeps its own time.
    pub fn push(&mut self, mut item: HistoryItem) -> &HistoryItem {
        if let Some(newest) = self.0.first() {
            if item.timestamp_millis <= newest.timestamp_millis {
                match newest.timestamp_millis.checked_add(1) {
                    Some(next) => item.timestamp_millis = next,
                    None => self.0.clear(),
                }
            }
        }
        self.0.insert(0, item);
        self.0.truncate(HISTORY_CAPACITY);
        &self.0[0]
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn newest(&self) -> Option<&HistoryItem> {
        self.0.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.0.iter()
    }
}

impl FromIterator<HistoryItem> for HistoryLog {
    /// Drops entries whose timestamp is not a calendar time, sorts
    /// newest-first, drops entries that share a timestamp with a newer one,
    /// and keeps the first [`HISTORY_CAPACITY`].
    fn from_iter<I: IntoIterator<Item = HistoryItem>>(iter: I) -> Self {
        let mut items: Vec<HistoryItem> = iter
            .into_iter()
            .filter(|item| time::from_millis(item.timestamp_millis).is_some())
            .collect();
        items.sort_by(|a, b| b.timestamp_millis.cmp(&a.timestamp_millis));
        items.dedup_by_key(|item| item.timestamp_millis);
        items.truncate(HISTORY_CAPACITY);
        Self(items)
    }
}

impl<'de> Deserialize<'de> for HistoryLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<HistoryItem>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
