use std::fmt;
use std::str::FromStr;

use crate::models::SymptomRecord;

/// Sentinel that matches every category
pub const ALL_CATEGORIES: &str = "all";

/// Category half of the filter key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Filter symptoms by name and category, preserving catalog order
///
/// Filter logic:
/// - Name: case-insensitive substring match on the trimmed search term (empty matches all)
/// - Category: exact match, or anything when the filter is [`CategoryFilter::All`]
/// - Both conditions must hold
pub fn filter_symptoms<'a>(
    symptoms: &'a [SymptomRecord],
    search_term: &str,
    category: &CategoryFilter,
) -> Vec<&'a SymptomRecord> {
    let needle = search_term.trim().to_lowercase();
    symptoms
        .iter()
        .filter(|symptom| category.matches(&symptom.category))
        .filter(|symptom| match_name(symptom, &needle))
        .collect()
}

/// Match symptom name against an already-lowercased needle
fn match_name(symptom: &SymptomRecord, needle: &str) -> bool {
    needle.is_empty() || symptom.name.to_lowercase().contains(needle)
}
