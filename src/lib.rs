//! Symptom Insight - Cross-reference reported symptoms against a reference catalog
//!
//! This library holds the engine behind the `symptom-insight` binary:
//!
//! - Loading and validating the symptom catalog and its association tables
//! - Filtering symptoms by search text and category, with debounced input
//! - Aggregating a selection into per-symptom results and summary distributions
//! - Persisting analysis history, bookmarks and the display preference
//!
//! The output is reference information only; it does not diagnose.
//!
//! # Example
//!
//! ```no_run
//! use symptom_insight::{Catalog, Session, SymptomId};
//! use symptom_insight::storage::MemoryStore;
//!
//! let mut session = Session::new(Catalog::builtin()?, MemoryStore::new());
//! session.toggle_selection(SymptomId(1));
//! let results = session.analyze()?;
//! println!("{} conditions", results[0].conditions.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod filters;
pub mod models;
pub mod selection;
pub mod session;
pub mod storage;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use analysis::{AnalysisError, analyze, format_report, summarize};
pub use catalog::{Catalog, CatalogError, CatalogLookup};
pub use models::{AnalysisResult, AnalysisSummary, HistoryEntry, Severity, SymptomId, SymptomRecord};
pub use selection::SelectionState;
pub use session::Session;
pub use storage::{FileStore, HistoryManager, KeyValueStore, MemoryStore, PersistenceError};
