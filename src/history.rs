//! Bounded, newest-first record of past conversions.
//!
//! The store is purely in-memory; every mutation is followed by a
//! persistence effect in the reducer, so this module stays testable without
//! touching disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of conversions retained.
pub const HISTORY_LIMIT: usize = 10;

/// Characters of extracted text shown in the history panel.
pub const PREVIEW_CHARS: usize = 50;

/// One past successful conversion. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub file_name: String,
    pub text: String,
    pub preview: String,
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    /// Rebuild the store from persisted items, enforcing the cap and id
    /// uniqueness on data that may predate either rule.
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        let mut store = HistoryStore::default();
        for item in items {
            if store.items.len() >= HISTORY_LIMIT {
                break;
            }
            if store.items.iter().any(|existing| existing.id == item.id) {
                continue;
            }
            store.items.push(item);
        }
        store
    }

    /// Entries, newest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Record a successful conversion at the front of the list, evicting the
    /// insertion-order oldest entry once the cap is exceeded.
    pub fn add(&mut self, file_name: &str, text: &str) {
        let timestamp = Utc::now();
        // Millisecond clock as the id, bumped past any existing id so two
        // conversions landing in the same millisecond stay distinct.
        let mut id = timestamp.timestamp_millis().max(0) as u64;
        if let Some(max) = self.items.iter().map(|item| item.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        self.items.insert(
            0,
            HistoryItem {
                id,
                timestamp,
                file_name: file_name.to_string(),
                text: text.to_string(),
                preview: preview_of(text),
            },
        );
        self.items.truncate(HISTORY_LIMIT);
    }

    /// Remove the entry with the given id; unknown ids are a no-op.
    pub fn remove(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// First `PREVIEW_CHARS` characters of `text`. The ellipsis marker is only
/// appended when something was actually cut off.
pub fn preview_of(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => {
            let mut preview = text[..cut].to_string();
            preview.push_str("...");
            preview
        }
        None => text.to_string(),
    }
}
