//! Data models for the symptom analysis engine.
//!
//! - [`SymptomRecord`] - Immutable catalog entry, keyed by id and joined by name
//! - [`ConditionAssociation`], [`DeviceEntry`], [`TestEntry`] - Reference table rows
//! - [`AnalysisResult`] - Composite per-symptom result produced by analysis
//! - [`CategorySummary`], [`UrgencySummary`] - Derived analytics
//! - [`HistoryEntry`] - Persisted snapshot of a past analysis
//!
//! Every snapshot type derives serde so the CLI can emit it as JSON and the
//! history manager can persist it.

pub mod analysis;
pub mod catalog;
pub mod history;
pub mod symptom;

pub use analysis::{AnalysisResult, AnalysisSummary, CategorySummary, UrgencySummary};
pub use catalog::{
    ConditionAssociation, DeviceEntry, ProductEntry, TestEntry, TipEntry, Urgency, UrgencyTier,
};
pub use history::{HistoryEntry, HistorySymptom};
pub use symptom::{SEVERITY_NOT_SPECIFIED, Severity, SymptomId, SymptomRecord};
