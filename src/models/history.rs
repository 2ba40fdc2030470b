use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::symptom::{Severity, SymptomId};

/// One symptom as captured in a history snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySymptom {
    pub id: SymptomId,
    pub name: String,
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Snapshot of the selection taken on a successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation-time token in milliseconds, strictly increasing across entries
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub symptoms: Vec<HistorySymptom>,
}

impl HistoryEntry {
    /// Comma-separated symptom names for list views
    pub fn summary(&self) -> String {
        self.symptoms.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}
