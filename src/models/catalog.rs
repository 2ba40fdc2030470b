use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Urgency attached to a condition association, normalized at ingestion.
///
/// Source labels mix simple tiers with compound ranges ("Moderate to High").
/// The two compounds that appear regularly keep their own variant; any other
/// "A to B" range collapses onto the variant for its upper bound `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Urgency {
    Low,
    Moderate,
    ModerateToHigh,
    High,
    HighToCritical,
    Critical,
}

/// Four-bucket grouping used by the urgency distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UrgencyTier {
    Critical,
    High,
    Moderate,
    Low,
}

impl UrgencyTier {
    /// Display order, most urgent first
    pub const ORDERED: [UrgencyTier; 4] =
        [UrgencyTier::Critical, UrgencyTier::High, UrgencyTier::Moderate, UrgencyTier::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Critical => "Critical",
            UrgencyTier::High => "High",
            UrgencyTier::Moderate => "Moderate",
            UrgencyTier::Low => "Low",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Moderate => "Moderate",
            Urgency::ModerateToHigh => "Moderate-to-High",
            Urgency::High => "High",
            Urgency::HighToCritical => "High-to-Critical",
            Urgency::Critical => "Critical",
        }
    }

    /// Bucket for the urgency distribution. Compound ranges count toward their upper bound.
    pub fn tier(&self) -> UrgencyTier {
        match self {
            Urgency::Low => UrgencyTier::Low,
            Urgency::Moderate => UrgencyTier::Moderate,
            Urgency::ModerateToHigh | Urgency::High => UrgencyTier::High,
            Urgency::HighToCritical | Urgency::Critical => UrgencyTier::Critical,
        }
    }

    /// Normalize a free-form source label.
    ///
    /// Accepts any casing and `-`, `_` or whitespace as separators. Unknown
    /// labels fall back to [`Urgency::Moderate`] and are logged.
    pub fn normalize(label: &str) -> Urgency {
        let canonical = label
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match canonical.as_str() {
            "low" => Urgency::Low,
            "moderate" | "medium" => Urgency::Moderate,
            "moderate to high" => Urgency::ModerateToHigh,
            "high" => Urgency::High,
            "high to critical" => Urgency::HighToCritical,
            "critical" => Urgency::Critical,
            _ => {
                if let Some((_, upper)) = canonical.rsplit_once(" to ") {
                    let normalized = Urgency::normalize(upper);
                    tracing::debug!(
                        label,
                        normalized = normalized.as_str(),
                        "Collapsed compound urgency onto upper bound"
                    );
                    normalized
                } else {
                    tracing::warn!(label, "Unrecognized urgency label, treating as Moderate");
                    Urgency::Moderate
                }
            }
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Urgency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Urgency::normalize(&label))
    }
}

/// One possible condition linked to a symptom, in source-table order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionAssociation {
    pub condition: String,
    pub probability: String,
    pub solution: String,
    pub urgency: Urgency,
}

/// Opaque product suggestion
pub type ProductEntry = String;

/// Opaque lifestyle tip
pub type TipEntry = String;

/// Home monitoring device suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub name: String,
    pub brand: String,
    #[serde(rename = "use")]
    pub usage: String,
    pub link: String,
}

/// Diagnostic test suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEntry {
    pub test: String,
    pub provider: String,
    pub link: String,
}
