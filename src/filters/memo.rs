use crate::catalog::Catalog;
use crate::models::SymptomId;

use super::apply::{CategoryFilter, filter_symptoms};

/// Memoized filtered view of the symptom catalog.
///
/// Holds the ids produced for the last `(search term, category)` key and only
/// recomputes when that key changes.
#[derive(Debug, Default)]
pub struct FilterEngine {
    key: Option<(String, CategoryFilter)>,
    visible: Vec<SymptomId>,
    recomputations: usize,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible symptom ids for the key, in catalog order
    pub fn view(&mut self, catalog: &Catalog, search_term: &str, category: &CategoryFilter) -> &[SymptomId] {
        let unchanged = self
            .key
            .as_ref()
            .is_some_and(|(term, cat)| term == search_term && cat == category);

        if !unchanged {
            self.visible = filter_symptoms(catalog.symptoms(), search_term, category)
                .into_iter()
                .map(|symptom| symptom.id)
                .collect();
            self.key = Some((search_term.to_string(), category.clone()));
            self.recomputations += 1;
            tracing::debug!(
                search_term,
                category = %category,
                visible = self.visible.len(),
                "Recomputed filtered symptom view"
            );
        }

        &self.visible
    }

    /// Number of times the view was actually recomputed
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
