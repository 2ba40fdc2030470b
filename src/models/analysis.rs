use serde::{Deserialize, Serialize};

use super::catalog::{ConditionAssociation, DeviceEntry, ProductEntry, TestEntry, TipEntry, UrgencyTier};
use super::symptom::{Severity, SymptomId};

/// Composite per-symptom result joined across all reference tables.
///
/// Dimensions with no catalog rows for the symptom are empty, never missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symptom_id: SymptomId,
    pub name: String,
    pub category: String,
    pub severity: Option<Severity>,
    pub conditions: Vec<ConditionAssociation>,
    pub products: Vec<ProductEntry>,
    pub devices: Vec<DeviceEntry>,
    pub tests: Vec<TestEntry>,
    pub tips: Vec<TipEntry>,
}

impl AnalysisResult {
    pub fn severity_label(&self) -> &'static str {
        Severity::label_of(self.severity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub member_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencySummary {
    pub tier: UrgencyTier,
    pub count: usize,
}

/// Both distributions bundled for presentation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub categories: Vec<CategorySummary>,
    pub urgency: Vec<UrgencySummary>,
    pub total_conditions: usize,
}
