//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use symptom_insight::{Catalog, FileStore, Session};
use tempfile::TempDir;

/// Builder for small catalog documents
pub struct CatalogBuilder {
    symptoms: Vec<Value>,
    conditions: serde_json::Map<String, Value>,
    products: serde_json::Map<String, Value>,
    tips: serde_json::Map<String, Value>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            symptoms: Vec::new(),
            conditions: serde_json::Map::new(),
            products: serde_json::Map::new(),
            tips: serde_json::Map::new(),
        }
    }

    pub fn symptom(mut self, id: u32, name: &str, category: &str) -> Self {
        self.symptoms.push(json!({ "id": id, "name": name, "category": category }));
        self
    }

    /// Add a condition row with the given urgency label
    pub fn condition(mut self, symptom: &str, condition: &str, urgency: &str) -> Self {
        let rows = self.conditions.entry(symptom.to_string()).or_insert_with(|| json!([]));
        if let Value::Array(rows) = rows {
            rows.push(json!({
                "condition": condition,
                "probability": "Medium",
                "solution": format!("Treat {}", condition),
                "urgency": urgency,
            }));
        }
        self
    }

    pub fn products(mut self, symptom: &str, items: &[&str]) -> Self {
        self.products.insert(symptom.to_string(), json!(items));
        self
    }

    pub fn tips(mut self, symptom: &str, items: &[&str]) -> Self {
        self.tips.insert(symptom.to_string(), json!(items));
        self
    }

    pub fn to_json(&self) -> String {
        json!({
            "symptoms": self.symptoms,
            "conditions": self.conditions,
            "products": self.products,
            "tips": self.tips,
        })
        .to_string()
    }

    pub fn build(&self) -> Catalog {
        Catalog::from_json(&self.to_json()).expect("Failed to parse test catalog")
    }

    /// Write the catalog into `dir` and return the file path
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("catalog.json");
        fs::write(&path, self.to_json()).expect("Failed to write catalog");
        path
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary data directory holding the persisted store files
pub struct DataDir {
    temp_dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Pre-seed a raw `<key>.json` value
    pub fn with_file(self, key: &str, content: &str) -> Self {
        fs::write(self.path().join(format!("{}.json", key)), content)
            .expect("Failed to seed store file");
        self
    }

    pub fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path().join(format!("{}.json", key))).ok()
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.path())
    }

    /// Open a session over the built-in catalog backed by this directory
    pub fn session(&self) -> Session<FileStore> {
        Session::new(Catalog::builtin().expect("Built-in catalog must parse"), self.store())
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new()
    }
}
