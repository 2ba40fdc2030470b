//! In-memory selection store: chosen symptom ids plus their severities.
//!
//! Invariant: every key in the severity map is also a selected id.
//! Deselecting a symptom discards its severity.

use std::collections::HashMap;

use crate::models::{HistorySymptom, Severity, SymptomId};

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Selected ids in insertion order (iteration order for analysis)
    ids: Vec<SymptomId>,
    severities: HashMap<SymptomId, Severity>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a selection from a history snapshot, keeping snapshot order
    pub fn from_snapshot(symptoms: &[HistorySymptom]) -> Self {
        let mut selection = Self::new();
        for symptom in symptoms {
            if selection.is_selected(symptom.id) {
                continue;
            }
            selection.ids.push(symptom.id);
            if let Some(severity) = symptom.severity {
                selection.severities.insert(symptom.id, severity);
            }
        }
        selection
    }

    /// Add the id if absent, remove it (and its severity) if present.
    ///
    /// Returns `true` when the id is selected after the call.
    pub fn toggle(&mut self, id: SymptomId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&selected| selected == id) {
            self.ids.remove(pos);
            self.severities.remove(&id);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Attach a severity to a selected symptom. `None` clears it.
    ///
    /// Rejected (returns `false`) when the id is not selected.
    pub fn set_severity(&mut self, id: SymptomId, severity: Option<Severity>) -> bool {
        if !self.is_selected(id) {
            return false;
        }
        match severity {
            Some(value) => {
                self.severities.insert(id, value);
            }
            None => {
                self.severities.remove(&id);
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.severities.clear();
    }

    pub fn is_selected(&self, id: SymptomId) -> bool {
        self.ids.contains(&id)
    }

    pub fn severity(&self, id: SymptomId) -> Option<Severity> {
        self.severities.get(&id).copied()
    }

    pub fn ids(&self) -> &[SymptomId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Same ids and same severities; insertion order is ignored
impl PartialEq for SelectionState {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len()
            && self.ids.iter().all(|id| other.is_selected(*id))
            && self.severities == other.severities
    }
}

impl Eq for SelectionState {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle(SymptomId(1)));
        assert!(selection.is_selected(SymptomId(1)));
        assert!(!selection.toggle(SymptomId(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_double_toggle_discards_severity() {
        let mut selection = SelectionState::new();
        selection.toggle(SymptomId(3));
        let original = selection.clone();

        selection.toggle(SymptomId(7));
        assert!(selection.set_severity(SymptomId(7), Some(Severity::Severe)));
        selection.toggle(SymptomId(7));

        assert_eq!(selection, original);
        assert_eq!(selection.severity(SymptomId(7)), None);

        // Reselecting starts without the old severity
        selection.toggle(SymptomId(7));
        assert_eq!(selection.severity(SymptomId(7)), None);
    }

    #[test]
    fn test_set_severity_rejected_when_not_selected() {
        let mut selection = SelectionState::new();
        assert!(!selection.set_severity(SymptomId(2), Some(Severity::Mild)));
        assert_eq!(selection.severity(SymptomId(2)), None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_set_severity_none_clears() {
        let mut selection = SelectionState::new();
        selection.toggle(SymptomId(2));
        selection.set_severity(SymptomId(2), Some(Severity::Moderate));
        assert!(selection.set_severity(SymptomId(2), None));
        assert_eq!(selection.severity(SymptomId(2)), None);
        assert!(selection.is_selected(SymptomId(2)));
    }

    #[test]
    fn test_clear_empties_both() {
        let mut selection = SelectionState::new();
        selection.toggle(SymptomId(1));
        selection.toggle(SymptomId(2));
        selection.set_severity(SymptomId(1), Some(Severity::Mild));
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.severity(SymptomId(1)), None);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut selection = SelectionState::new();
        for id in [5, 1, 3] {
            selection.toggle(SymptomId(id));
        }
        assert_eq!(selection.ids(), &[SymptomId(5), SymptomId(1), SymptomId(3)]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = SelectionState::new();
        a.toggle(SymptomId(1));
        a.toggle(SymptomId(2));
        let mut b = SelectionState::new();
        b.toggle(SymptomId(2));
        b.toggle(SymptomId(1));
        assert_eq!(a, b);

        b.set_severity(SymptomId(1), Some(Severity::Mild));
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_snapshot_skips_duplicate_ids() {
        let snapshot = vec![
            HistorySymptom { id: SymptomId(1), name: "A".into(), severity: Some(Severity::Mild) },
            HistorySymptom { id: SymptomId(1), name: "A".into(), severity: Some(Severity::Severe) },
            HistorySymptom { id: SymptomId(2), name: "B".into(), severity: None },
        ];
        let selection = SelectionState::from_snapshot(&snapshot);
        assert_eq!(selection.ids(), &[SymptomId(1), SymptomId(2)]);
        assert_eq!(selection.severity(SymptomId(1)), Some(Severity::Mild));
    }
}
