//! Session state wiring the engine components together.
//!
//! A [`Session`] owns the catalog, the live selection, the filtered view with
//! its debounced search input, the last analysis and the persisted
//! history/bookmark manager. Every operation is a discrete, synchronous
//! reaction to one user action.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::analysis::{self, AnalysisError, format_report, summarize};
use crate::catalog::{Catalog, CatalogLookup};
use crate::filters::{CategoryFilter, Debouncer, FilterEngine, SEARCH_DEBOUNCE};
use crate::models::{
    AnalysisResult, AnalysisSummary, HistoryEntry, HistorySymptom, Severity, SymptomId,
    SymptomRecord,
};
use crate::selection::SelectionState;
use crate::storage::{HistoryManager, KeyValueStore};

pub struct Session<S: KeyValueStore> {
    catalog: Catalog,
    selection: SelectionState,
    filter: FilterEngine,
    search_input: Debouncer<String>,
    search_term: String,
    category: CategoryFilter,
    results: Vec<AnalysisResult>,
    manager: HistoryManager<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, loading persisted history and bookmarks from `store`
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog,
            selection: SelectionState::new(),
            filter: FilterEngine::new(),
            search_input: Debouncer::new(SEARCH_DEBOUNCE),
            search_term: String::new(),
            category: CategoryFilter::All,
            results: Vec::new(),
            manager: HistoryManager::load(store),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ── Filter ────────────────────────────────────────────

    /// Register a search edit; it takes effect after the debounce quiet period
    pub fn input_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input.schedule(text.into(), now);
    }

    /// Apply a pending search edit if its quiet period has elapsed.
    ///
    /// Returns `true` when the applied search term changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(term) => self.apply_search(term),
            None => false,
        }
    }

    /// Apply a search term immediately, discarding any pending edit
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        self.search_input.cancel();
        self.apply_search(term.into())
    }

    fn apply_search(&mut self, term: String) -> bool {
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        true
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_pending(&self) -> bool {
        self.search_input.is_pending()
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Symptoms matching the applied search term and category, in catalog order
    pub fn visible_symptoms(&mut self) -> Vec<&SymptomRecord> {
        let ids = self.filter.view(&self.catalog, &self.search_term, &self.category);
        ids.iter().filter_map(|&id| self.catalog.symptom(id)).collect()
    }

    /// Recomputations performed by the memoized filter
    pub fn filter_recomputations(&self) -> usize {
        self.filter.recomputations()
    }

    // ── Selection ─────────────────────────────────────────

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Toggle a catalog symptom. Returns `None` for ids not in the catalog.
    pub fn toggle_selection(&mut self, id: SymptomId) -> Option<bool> {
        if !self.catalog.contains(id) {
            tracing::warn!(id = %id, "Ignoring toggle for unknown symptom id");
            return None;
        }
        Some(self.selection.toggle(id))
    }

    /// Set severity for a selected symptom; `false` if it is not selected
    pub fn set_severity(&mut self, id: SymptomId, severity: Option<Severity>) -> bool {
        self.selection.set_severity(id, severity)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.results.clear();
    }

    // ── Analysis ──────────────────────────────────────────

    /// Analyze the current selection and record it in history.
    ///
    /// On error nothing changes: no results are replaced and no history entry is created.
    pub fn analyze(&mut self) -> Result<&[AnalysisResult], AnalysisError> {
        self.analyze_at(Utc::now())
    }

    pub fn analyze_at(&mut self, now: DateTime<Utc>) -> Result<&[AnalysisResult], AnalysisError> {
        let results = analysis::analyze(&self.catalog, &self.selection)?;
        let snapshot = results
            .iter()
            .map(|r| HistorySymptom { id: r.symptom_id, name: r.name.clone(), severity: r.severity })
            .collect();
        self.manager.record_at(snapshot, now);
        tracing::info!(symptoms = results.len(), "Analysis complete");
        self.results = results;
        Ok(&self.results)
    }

    /// Results of the last successful analysis or restore
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn summary(&self) -> AnalysisSummary {
        summarize(&self.results)
    }

    /// Plain-text export of the last results; `None` when nothing was analyzed
    pub fn export_report(&self, now: DateTime<Utc>) -> Option<String> {
        if self.results.is_empty() {
            return None;
        }
        Some(format_report(&self.results, now))
    }

    // ── History & bookmarks ───────────────────────────────

    pub fn history(&self) -> &[HistoryEntry] {
        self.manager.history()
    }

    /// Replace the live selection with a history snapshot and rebuild its results.
    ///
    /// Snapshot ids no longer in the catalog are dropped. History is not
    /// modified and no new entry is recorded. Returns `false` for unknown entries.
    pub fn restore(&mut self, entry_id: u64) -> bool {
        let Some(mut restored) = self.manager.restore(entry_id) else {
            return false;
        };

        let stale: Vec<SymptomId> =
            restored.ids().iter().copied().filter(|&id| !self.catalog.contains(id)).collect();
        for id in stale {
            tracing::warn!(id = %id, entry = entry_id, "Dropping restored symptom missing from catalog");
            restored.toggle(id);
        }

        self.results = analysis::analyze(&self.catalog, &restored).unwrap_or_default();
        self.selection = restored;
        true
    }

    pub fn delete_history(&mut self, entry_id: u64) -> bool {
        self.manager.delete(entry_id)
    }

    pub fn clear_history(&mut self) {
        self.manager.clear_history();
    }

    /// Toggle a bookmark. Returns `None` for ids not in the catalog.
    pub fn toggle_bookmark(&mut self, id: SymptomId) -> Option<bool> {
        if !self.catalog.contains(id) {
            tracing::warn!(id = %id, "Ignoring bookmark for unknown symptom id");
            return None;
        }
        Some(self.manager.toggle_bookmark(id))
    }

    pub fn is_bookmarked(&self, id: SymptomId) -> bool {
        self.manager.is_bookmarked(id)
    }

    /// Bookmarked catalog symptoms; stored ids missing from the catalog are skipped
    pub fn bookmarks(&self) -> Vec<&SymptomRecord> {
        self.manager.bookmarks().into_iter().filter_map(|id| self.catalog.symptom(id)).collect()
    }

    pub fn display_detailed(&self) -> bool {
        self.manager.display_detailed()
    }

    pub fn set_display_detailed(&mut self, detailed: bool) {
        self.manager.set_display_detailed(detailed);
    }
}
