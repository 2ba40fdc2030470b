//! Catalog ingestion and load-time validation.
//!
//! Follows a graceful degradation approach: duplicate symptoms are skipped,
//! association rows without a matching symptom and symptoms without condition
//! rows are logged as warnings. None of these fail the load; only unreadable
//! or malformed JSON does.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::CatalogError;
use super::accessor::{Catalog, CatalogIssue};
use crate::models::{
    ConditionAssociation, DeviceEntry, ProductEntry, SymptomRecord, TestEntry, TipEntry,
};

/// Reference catalog compiled into the binary
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// On-disk catalog document. Every association table is optional.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    symptoms: Vec<SymptomRecord>,
    #[serde(default)]
    conditions: HashMap<String, Vec<ConditionAssociation>>,
    #[serde(default)]
    products: HashMap<String, Vec<ProductEntry>>,
    #[serde(default)]
    devices: HashMap<String, Vec<DeviceEntry>>,
    #[serde(default)]
    tests: HashMap<String, Vec<TestEntry>>,
    #[serde(default)]
    tips: HashMap<String, Vec<TipEntry>>,
}

impl Catalog {
    /// Parse the catalog embedded in the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Read and parse a catalog file
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&json)
    }

    /// Parse a catalog document and build the lookup maps
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(build(raw))
    }
}

fn build(raw: RawCatalog) -> Catalog {
    let mut issues = Vec::new();
    let mut symptoms = Vec::with_capacity(raw.symptoms.len());
    let mut by_id = HashMap::with_capacity(raw.symptoms.len());
    let mut names = HashSet::with_capacity(raw.symptoms.len());

    for record in raw.symptoms {
        if by_id.contains_key(&record.id) {
            tracing::warn!(id = %record.id, name = %record.name, "Skipping symptom with duplicate id");
            issues.push(CatalogIssue::DuplicateId(record.id));
            continue;
        }
        if !names.insert(record.name.clone()) {
            tracing::warn!(id = %record.id, name = %record.name, "Skipping symptom with duplicate name");
            issues.push(CatalogIssue::DuplicateName(record.name));
            continue;
        }
        by_id.insert(record.id, symptoms.len());
        symptoms.push(record);
    }

    check_orphans("conditions", raw.conditions.keys(), &names, &mut issues);
    check_orphans("products", raw.products.keys(), &names, &mut issues);
    check_orphans("devices", raw.devices.keys(), &names, &mut issues);
    check_orphans("tests", raw.tests.keys(), &names, &mut issues);
    check_orphans("tips", raw.tips.keys(), &names, &mut issues);

    for symptom in &symptoms {
        let covered = raw.conditions.get(&symptom.name).is_some_and(|rows| !rows.is_empty());
        if !covered {
            tracing::warn!(name = %symptom.name, "Symptom has no condition associations");
            issues.push(CatalogIssue::NoConditions(symptom.name.clone()));
        }
    }

    tracing::debug!(
        symptoms = symptoms.len(),
        issues = issues.len(),
        "Loaded reference catalog"
    );

    Catalog {
        symptoms,
        by_id,
        conditions: raw.conditions,
        products: raw.products,
        devices: raw.devices,
        tests: raw.tests,
        tips: raw.tips,
        issues,
    }
}

fn check_orphans<'a>(
    table: &'static str,
    keys: impl Iterator<Item = &'a String>,
    names: &HashSet<String>,
    issues: &mut Vec<CatalogIssue>,
) {
    let mut orphans: Vec<&String> = keys.filter(|key| !names.contains(*key)).collect();
    // HashMap iteration order is random; keep the issue list stable
    orphans.sort();
    for name in orphans {
        tracing::warn!(table, name = %name, "Reference rows for unknown symptom");
        issues.push(CatalogIssue::OrphanKey { table, name: name.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogLookup;
    use crate::models::{SymptomId, Urgency};

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 20);
        assert!(catalog.issues().iter().all(|i| !matches!(i, CatalogIssue::OrphanKey { .. })));
    }

    #[test]
    fn test_builtin_reports_uncovered_symptom() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.issues().contains(&CatalogIssue::NoConditions("Chills".to_string())));
    }

    #[test]
    fn test_builtin_normalizes_compound_urgency() {
        let catalog = Catalog::builtin().unwrap();
        let stroke = catalog
            .conditions("Dizziness")
            .iter()
            .find(|c| c.condition == "Stroke")
            .unwrap();
        assert_eq!(stroke.urgency, Urgency::Critical);
    }

    #[test]
    fn test_minimal_document_only_symptoms() {
        let catalog = Catalog::from_json(r#"{"symptoms":[{"id":1,"name":"A","category":"X"}]}"#)
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.conditions("A").is_empty());
        assert_eq!(catalog.issues(), &[CatalogIssue::NoConditions("A".to_string())]);
    }

    #[test]
    fn test_duplicates_skipped_first_wins() {
        let json = r#"{
            "symptoms": [
                {"id": 1, "name": "A", "category": "X"},
                {"id": 1, "name": "B", "category": "X"},
                {"id": 2, "name": "A", "category": "Y"}
            ]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.symptom(SymptomId(1)).unwrap().name, "A");
        assert!(catalog.symptom(SymptomId(2)).is_none());
        assert!(catalog.issues().contains(&CatalogIssue::DuplicateId(SymptomId(1))));
        assert!(catalog.issues().contains(&CatalogIssue::DuplicateName("A".to_string())));
    }

    #[test]
    fn test_orphan_keys_reported_not_fatal() {
        let json = r#"{
            "symptoms": [{"id": 1, "name": "A", "category": "X"}],
            "conditions": {"A": [{"condition":"C","probability":"High","solution":"S","urgency":"Low"}]},
            "tips": {"Ghost": ["tip"]}
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(
            catalog.issues(),
            &[CatalogIssue::OrphanKey { table: "tips", name: "Ghost".to_string() }]
        );
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(Catalog::from_json("{not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Catalog::from_path(Path::new("/definitely/not/here/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
