use std::collections::HashMap;

use crate::models::{AnalysisResult, AnalysisSummary, CategorySummary, UrgencySummary, UrgencyTier};

/// Group results by category.
///
/// Categories appear in first-appearance order of `results`; categories with
/// no selected symptoms are omitted rather than zero-filled.
pub fn category_distribution(results: &[AnalysisResult]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for result in results {
        let idx = *positions.entry(result.category.as_str()).or_insert_with(|| {
            summaries.push(CategorySummary {
                category: result.category.clone(),
                count: 0,
                member_names: Vec::new(),
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[idx];
        if !summary.member_names.contains(&result.name) {
            summary.count += 1;
            summary.member_names.push(result.name.clone());
        }
    }

    summaries
}

/// Count condition associations (not symptoms) per urgency tier.
///
/// Compound urgencies count toward their upper bound. Tiers are emitted most
/// urgent first; empty tiers are omitted.
pub fn urgency_distribution(results: &[AnalysisResult]) -> Vec<UrgencySummary> {
    let mut counts: HashMap<UrgencyTier, usize> = HashMap::new();
    for condition in results.iter().flat_map(|r| &r.conditions) {
        *counts.entry(condition.urgency.tier()).or_default() += 1;
    }

    UrgencyTier::ORDERED
        .iter()
        .filter_map(|tier| counts.get(tier).map(|&count| UrgencySummary { tier: *tier, count }))
        .collect()
}

/// Both distributions plus the total number of condition associations
pub fn summarize(results: &[AnalysisResult]) -> AnalysisSummary {
    AnalysisSummary {
        categories: category_distribution(results),
        urgency: urgency_distribution(results),
        total_conditions: results.iter().map(|r| r.conditions.len()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConditionAssociation, SymptomId, Urgency};

    fn condition(urgency: Urgency) -> ConditionAssociation {
        ConditionAssociation {
            condition: "C".into(),
            probability: "High".into(),
            solution: "S".into(),
            urgency,
        }
    }

    fn result(id: u32, name: &str, category: &str, urgencies: &[Urgency]) -> AnalysisResult {
        AnalysisResult {
            symptom_id: SymptomId(id),
            name: name.into(),
            category: category.into(),
            severity: None,
            conditions: urgencies.iter().map(|u| condition(*u)).collect(),
            products: vec![],
            devices: vec![],
            tests: vec![],
            tips: vec![],
        }
    }

    #[test]
    fn test_category_distribution_groups_and_keeps_members() {
        let results = vec![
            result(1, "Headache", "Neurological", &[]),
            result(2, "Fever", "General", &[]),
            result(4, "Dizziness", "Neurological", &[]),
        ];
        let summary = category_distribution(&results);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].category, "Neurological");
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].member_names, vec!["Headache", "Dizziness"]);
        assert_eq!(summary[1].category, "General");
        assert_eq!(summary[1].count, 1);
    }

    #[test]
    fn test_category_distribution_empty() {
        assert!(category_distribution(&[]).is_empty());
    }

    #[test]
    fn test_urgency_counts_conditions_not_symptoms() {
        let results = vec![
            result(1, "A", "X", &[Urgency::Low, Urgency::Low, Urgency::Critical]),
            result(2, "B", "X", &[Urgency::Low]),
        ];
        let summary = urgency_distribution(&results);
        assert_eq!(
            summary,
            vec![
                UrgencySummary { tier: UrgencyTier::Critical, count: 1 },
                UrgencySummary { tier: UrgencyTier::Low, count: 3 },
            ]
        );
    }

    #[test]
    fn test_urgency_compound_counts_toward_upper_bound() {
        let results = vec![result(
            1,
            "A",
            "X",
            &[Urgency::ModerateToHigh, Urgency::High, Urgency::HighToCritical, Urgency::Moderate],
        )];
        let summary = urgency_distribution(&results);
        assert_eq!(
            summary,
            vec![
                UrgencySummary { tier: UrgencyTier::Critical, count: 1 },
                UrgencySummary { tier: UrgencyTier::High, count: 2 },
                UrgencySummary { tier: UrgencyTier::Moderate, count: 1 },
            ]
        );
    }

    #[test]
    fn test_summarize_totals() {
        let results = vec![
            result(1, "A", "X", &[Urgency::Low, Urgency::High]),
            result(2, "B", "Y", &[]),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.total_conditions, 2);
        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.urgency.iter().map(|u| u.count).sum::<usize>(), 2);
    }
}
