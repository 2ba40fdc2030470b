//! Aggregation, analytics and export over a symptom selection.
//!
//! - [`analyze`] joins the selection against the catalog (one result per symptom)
//! - [`category_distribution`] / [`urgency_distribution`] reduce results to summaries
//! - [`format_report`] renders results as a flat plain-text report

pub mod aggregate;
pub mod report;
pub mod stats;

pub use aggregate::analyze;
pub use report::format_report;
pub use stats::{category_distribution, summarize, urgency_distribution};

use crate::models::SymptomId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Select at least one symptom to analyze")]
    NoSymptomsSelected,

    /// Selection references an id the catalog does not know: a selection-store bug
    #[error("Selected symptom id {0} is not in the catalog")]
    UnknownSymptomId(SymptomId),
}
