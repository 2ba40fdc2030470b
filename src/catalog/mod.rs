//! Read-only reference catalogs
//!
//! The symptom list plus five association tables (conditions, products,
//! devices, tests, tips), all joined by symptom name. Tables are loaded once
//! into hash maps; an unmatched name yields an empty slice, never an error.

pub mod accessor;
pub mod loader;

use std::path::PathBuf;

pub use accessor::{Catalog, CatalogIssue};
pub use loader::BUILTIN_CATALOG;

use crate::models::{
    ConditionAssociation, DeviceEntry, ProductEntry, SymptomId, SymptomRecord, TestEntry, TipEntry,
};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Name-keyed lookups the analysis engine needs from a catalog
pub trait CatalogLookup {
    fn symptom(&self, id: SymptomId) -> Option<&SymptomRecord>;
    fn conditions(&self, name: &str) -> &[ConditionAssociation];
    fn products(&self, name: &str) -> &[ProductEntry];
    fn devices(&self, name: &str) -> &[DeviceEntry];
    fn tests(&self, name: &str) -> &[TestEntry];
    fn tips(&self, name: &str) -> &[TipEntry];
}
