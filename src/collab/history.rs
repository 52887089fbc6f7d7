use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entries kept by [`DatasetHistory`].
pub const MAX_HISTORY_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub path: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_used: DateTime<Utc>,
}

/// Recently opened dataset paths, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetHistory {
    entries: Vec<HistoryEntry>,
}

impl DatasetHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<String>) {
        self.record_at(path, Utc::now());
    }

    pub fn record_at(&mut self, path: impl Into<String>, when: DateTime<Utc>) {
        let path = path.into();
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(
            0,
            HistoryEntry {
                path,
                last_used: when,
            },
        );
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display-only cache summary reported by an ingestion backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatus {
    pub path: String,
    pub files: u64,
    pub bytes: u64,
}
