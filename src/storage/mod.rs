//! Durable history and bookmark storage
//!
//! A small key-value store with one JSON document per logical key:
//! - `history`: most-recent-first analysis snapshots (capped)
//! - `bookmarks`: bookmarked symptom ids
//! - `displayPreference`: detailed/compact result view flag
//!
//! Default location is the platform data directory:
//! - macOS: `~/Library/Application Support/symptom-insight/`
//! - Linux: `~/.local/share/symptom-insight/`
//! - Windows: `%APPDATA%\symptom-insight\`

pub mod manager;
pub mod persistence;

pub use manager::{HISTORY_CAPACITY, HistoryManager};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};

pub const HISTORY_KEY: &str = "history";
pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const DISPLAY_PREFERENCE_KEY: &str = "displayPreference";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
