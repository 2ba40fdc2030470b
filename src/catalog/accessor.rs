use std::collections::HashMap;

use super::CatalogLookup;
use crate::models::{
    ConditionAssociation, DeviceEntry, ProductEntry, SymptomId, SymptomRecord, TestEntry, TipEntry,
};

/// Problem found while validating a catalog at load time. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// A later symptom reused an id; it was skipped
    DuplicateId(SymptomId),
    /// A later symptom reused a name; it was skipped
    DuplicateName(String),
    /// An association table has rows for a name with no symptom record
    OrphanKey { table: &'static str, name: String },
    /// A symptom has no condition rows
    NoConditions(String),
}

/// Immutable, name-keyed view over the reference tables
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) symptoms: Vec<SymptomRecord>,
    pub(crate) by_id: HashMap<SymptomId, usize>,
    pub(crate) conditions: HashMap<String, Vec<ConditionAssociation>>,
    pub(crate) products: HashMap<String, Vec<ProductEntry>>,
    pub(crate) devices: HashMap<String, Vec<DeviceEntry>>,
    pub(crate) tests: HashMap<String, Vec<TestEntry>>,
    pub(crate) tips: HashMap<String, Vec<TipEntry>>,
    pub(crate) issues: Vec<CatalogIssue>,
}

fn lookup<'a, T>(table: &'a HashMap<String, Vec<T>>, name: &str) -> &'a [T] {
    table.get(name).map(Vec::as_slice).unwrap_or(&[])
}

impl Catalog {
    /// All symptoms in source order
    pub fn symptoms(&self) -> &[SymptomRecord] {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn contains(&self, id: SymptomId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for symptom in &self.symptoms {
            if !seen.contains(&symptom.category.as_str()) {
                seen.push(&symptom.category);
            }
        }
        seen
    }

    /// Validation findings recorded during load
    pub fn issues(&self) -> &[CatalogIssue] {
        &self.issues
    }
}

impl CatalogLookup for Catalog {
    fn symptom(&self, id: SymptomId) -> Option<&SymptomRecord> {
        self.by_id.get(&id).map(|&idx| &self.symptoms[idx])
    }

    fn conditions(&self, name: &str) -> &[ConditionAssociation] {
        lookup(&self.conditions, name)
    }

    fn products(&self, name: &str) -> &[ProductEntry] {
        lookup(&self.products, name)
    }

    fn devices(&self, name: &str) -> &[DeviceEntry] {
        lookup(&self.devices, name)
    }

    fn tests(&self, name: &str) -> &[TestEntry] {
        lookup(&self.tests, name)
    }

    fn tips(&self, name: &str) -> &[TipEntry] {
        lookup(&self.tips, name)
    }
}
