use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label rendered when a selected symptom has no severity attached
pub const SEVERITY_NOT_SPECIFIED: &str = "Not specified";

/// Stable catalog identifier of a symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub u32);

impl fmt::Display for SymptomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SymptomId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(SymptomId)
    }
}

/// Immutable reference record from the symptom catalog.
///
/// `name` is globally unique and is the join key into every association table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub id: SymptomId,
    pub name: String,
    pub category: String,
}

/// User-reported severity. An unspecified severity is `None` wherever it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }

    /// Display label for an optional severity ("Not specified" when absent)
    pub fn label_of(severity: Option<Severity>) -> &'static str {
        severity.map(|s| s.as_str()).unwrap_or(SEVERITY_NOT_SPECIFIED)
    }

    /// Cycle forward: unspecified → Mild → Moderate → Severe → unspecified
    pub fn next(current: Option<Severity>) -> Option<Severity> {
        match current {
            None => Some(Severity::Mild),
            Some(Severity::Mild) => Some(Severity::Moderate),
            Some(Severity::Moderate) => Some(Severity::Severe),
            Some(Severity::Severe) => None,
        }
    }

    /// Cycle backward, the inverse of [`Severity::next`]
    pub fn prev(current: Option<Severity>) -> Option<Severity> {
        match current {
            None => Some(Severity::Severe),
            Some(Severity::Severe) => Some(Severity::Moderate),
            Some(Severity::Moderate) => Some(Severity::Mild),
            Some(Severity::Mild) => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(format!("Unknown severity '{}' (expected mild, moderate or severe)", other)),
        }
    }
}
