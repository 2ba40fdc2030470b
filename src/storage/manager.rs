//! History & bookmark manager.
//!
//! Owns the only cross-session state: the capped analysis history, the
//! bookmark set and the display preference. State is read once from the
//! store at construction and every mutation rewrites its key in full.
//!
//! # Error Handling Strategy
//!
//! In-memory state is the source of truth; the store is a best-effort mirror.
//! - Unreadable or corrupt values load as empty defaults (logged)
//! - Failed writes are logged and never roll back the in-memory change

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::persistence::KeyValueStore;
use super::{BOOKMARKS_KEY, DISPLAY_PREFERENCE_KEY, HISTORY_KEY, PersistenceError};
use crate::models::{HistoryEntry, HistorySymptom, SymptomId};
use crate::selection::SelectionState;

/// Maximum number of history entries kept; older entries are evicted
pub const HISTORY_CAPACITY: usize = 10;

pub struct HistoryManager<S: KeyValueStore> {
    store: S,
    history: Vec<HistoryEntry>,
    bookmarks: BTreeSet<SymptomId>,
    display_detailed: bool,
    last_id: u64,
}

impl<S: KeyValueStore> HistoryManager<S> {
    /// Read-through initialization from `store`
    pub fn load(store: S) -> Self {
        let mut history: Vec<HistoryEntry> = load_or_default(&store, HISTORY_KEY);
        if history.len() > HISTORY_CAPACITY {
            tracing::warn!(
                stored = history.len(),
                capacity = HISTORY_CAPACITY,
                "Stored history exceeds capacity, keeping newest entries"
            );
            history.truncate(HISTORY_CAPACITY);
        }
        let bookmarks: BTreeSet<SymptomId> = load_or_default(&store, BOOKMARKS_KEY);
        let display_detailed: bool = load_or_default(&store, DISPLAY_PREFERENCE_KEY);
        let last_id = history.iter().map(|entry| entry.id).max().unwrap_or(0);

        tracing::debug!(
            history = history.len(),
            bookmarks = bookmarks.len(),
            "Loaded persisted session state"
        );

        Self { store, history, bookmarks, display_detailed, last_id }
    }

    /// Most-recent-first history entries
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn entry(&self, entry_id: u64) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.id == entry_id)
    }

    /// Prepend a snapshot taken now, evicting entries beyond capacity
    pub fn record(&mut self, symptoms: Vec<HistorySymptom>) -> &HistoryEntry {
        self.record_at(symptoms, Utc::now())
    }

    /// Prepend a snapshot with an explicit creation time.
    ///
    /// The entry id is the creation time in milliseconds, bumped when needed
    /// so ids stay strictly increasing even if the clock stalls.
    pub fn record_at(&mut self, symptoms: Vec<HistorySymptom>, now: DateTime<Utc>) -> &HistoryEntry {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last_id.checked_add(1) {
            Some(next) => millis.max(next),
            None => {
                // Stored ids have exhausted the sequence; they cannot be genuine creation times
                tracing::warn!(
                    discarded = self.history.len(),
                    "Stored history ids are out of range, discarding stored history"
                );
                self.history.clear();
                millis
            }
        };
        self.last_id = id;

        self.history.insert(0, HistoryEntry { id, timestamp: now, symptoms });
        let evicted = self.history.len().saturating_sub(HISTORY_CAPACITY);
        self.history.truncate(HISTORY_CAPACITY);

        tracing::info!(id, evicted, "Recorded analysis in history");
        self.persist_history();
        &self.history[0]
    }

    /// Selection captured by an entry. History itself is left untouched.
    pub fn restore(&self, entry_id: u64) -> Option<SelectionState> {
        let entry = self.entry(entry_id)?;
        tracing::info!(id = entry_id, symptoms = entry.symptoms.len(), "Restoring history entry");
        Some(SelectionState::from_snapshot(&entry.symptoms))
    }

    /// Remove an entry wherever it sits. Returns `false` for unknown ids.
    pub fn delete(&mut self, entry_id: u64) -> bool {
        let before = self.history.len();
        self.history.retain(|entry| entry.id != entry_id);
        if self.history.len() == before {
            return false;
        }
        tracing::info!(id = entry_id, "Deleted history entry");
        self.persist_history();
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::info!("Cleared history");
        self.persist_history();
    }

    /// Add or remove a bookmark. Returns `true` when the id is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, id: SymptomId) -> bool {
        let bookmarked = if self.bookmarks.remove(&id) {
            false
        } else {
            self.bookmarks.insert(id);
            true
        };
        tracing::info!(id = %id, bookmarked, "Toggled bookmark");
        self.persist(BOOKMARKS_KEY, &self.bookmarks);
        bookmarked
    }

    pub fn is_bookmarked(&self, id: SymptomId) -> bool {
        self.bookmarks.contains(&id)
    }

    /// Bookmarked ids in ascending order
    pub fn bookmarks(&self) -> Vec<SymptomId> {
        self.bookmarks.iter().copied().collect()
    }

    /// Whether analysis views show detailed cards
    pub fn display_detailed(&self) -> bool {
        self.display_detailed
    }

    pub fn set_display_detailed(&mut self, detailed: bool) {
        self.display_detailed = detailed;
        self.persist(DISPLAY_PREFERENCE_KEY, &detailed);
    }

    fn persist_history(&self) {
        self.persist(HISTORY_KEY, &self.history);
    }

    /// Full rewrite of one key; failures are logged, never propagated
    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|source| PersistenceError::Corrupt { key: key.to_string(), source })
            .and_then(|json| self.store.write(key, &json));
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Failed to persist, keeping in-memory state");
        }
    }
}

/// Read and decode one key, falling back to the default on any failure
fn load_or_default<T: DeserializeOwned + Default>(store: &impl KeyValueStore, key: &str) -> T {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Store unavailable, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(source) => {
            let e = PersistenceError::Corrupt { key: key.to_string(), source };
            tracing::warn!(key, error = %e, "Ignoring corrupt stored value");
            T::default()
        }
    }
}
