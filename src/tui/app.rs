//! TUI application state and event handling.
//!
//! The `App` wraps a [`Session`] and translates key actions into session
//! operations:
//!
//! - **Debounced search**: keystrokes edit a local input buffer immediately;
//!   the session applies the term once typing pauses
//! - **Category cycling**: Tab walks "all" and then each catalog category
//! - **Selection and severity**: act on the highlighted symptom
//! - **Analysis, export and history restore**: delegate to the session and
//!   report the outcome through a transient status message

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use super::timestamps::format_timestamp;
use crate::analysis::AnalysisError;
use crate::clipboard::copy_report;
use crate::filters::CategoryFilter;
use crate::models::{Severity, SymptomId, SymptomRecord};
use crate::session::Session;
use crate::storage::KeyValueStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Event poll interval; also bounds how late a debounced search fires
const TICK_INTERVAL: Duration = Duration::from_millis(50);
const MAX_SEARCH_LEN: usize = 256;
const PAGE_SIZE: isize = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App<S: KeyValueStore> {
    session: Session<S>,
    search_input: String,
    selected_idx: usize,
    categories: Vec<String>,
    /// `None` shows every category
    category_idx: Option<usize>,
    /// Position of the last restored entry in the history list
    history_cursor: Option<usize>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: Session<S>) -> Self {
        let categories =
            session.catalog().categories().into_iter().map(str::to_string).collect();
        Self {
            session,
            search_input: String::new(),
            selected_idx: 0,
            categories,
            category_idx: None,
            history_cursor: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.tick(now);

            // Redraw when dirty, and periodically to pick up terminal resizes
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                self.draw(terminal)?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(TICK_INTERVAL)?;
            self.handle_action(action, Instant::now());
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let visible = self.visible();
        let bookmarks: Vec<SymptomId> = self.session.bookmarks().iter().map(|s| s.id).collect();
        let summary = self.session.summary();
        let category = self.session.category().to_string();

        terminal.draw(|f| {
            let state = RenderState {
                search_input: &self.search_input,
                search_pending: self.session.search_pending(),
                category: &category,
                symptoms: &visible,
                total_symptoms: self.session.catalog().len(),
                selected_idx: self.selected_idx,
                selection: self.session.selection(),
                bookmarks: &bookmarks,
                results: self.session.results(),
                summary: &summary,
                detailed: self.session.display_detailed(),
                status_message: self.status_message.as_ref(),
            };
            render_ui(f, &state);
        })?;
        Ok(())
    }

    /// Time-driven updates: expire status messages and fire the debounced search
    fn tick(&mut self, now: Instant) {
        if self.status_message.as_ref().is_some_and(|msg| now >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
        if self.session.tick(now) {
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn visible(&mut self) -> Vec<SymptomRecord> {
        self.session.visible_symptoms().into_iter().cloned().collect()
    }

    fn highlighted(&mut self) -> Option<SymptomRecord> {
        let idx = self.selected_idx;
        self.visible().into_iter().nth(idx)
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let duration_ms = match message_type {
            MessageType::Success => STATUS_SUCCESS_DURATION_MS,
            MessageType::Error => STATUS_ERROR_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::NextCategory => self.cycle_category(true),
            Action::PrevCategory => self.cycle_category(false),
            Action::ToggleSelection => self.toggle_selection(),
            Action::SeverityUp => self.cycle_severity(Severity::next),
            Action::SeverityDown => self.cycle_severity(Severity::prev),
            Action::ToggleBookmark => self.toggle_bookmark(),
            Action::Analyze => self.analyze(),
            Action::CopyReport => self.copy_report(),
            Action::RestoreHistory => self.restore_next(),
            Action::ToggleDetail => {
                let detailed = !self.session.display_detailed();
                self.session.set_display_detailed(detailed);
                let label = if detailed { "detailed" } else { "compact" };
                self.set_status(format!("Result view: {}", label), MessageType::Success);
            }
            Action::UpdateSearch(c) => self.update_search(c, now),
            Action::DeleteChar => self.delete_char(now),
            Action::None => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.visible().len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let count = self.categories.len();
        if count == 0 {
            return;
        }
        // Positions 0..count are categories, `count` stands for "all"
        let current = self.category_idx.unwrap_or(count);
        let next = if forward { (current + 1) % (count + 1) } else { (current + count) % (count + 1) };
        self.category_idx = (next < count).then_some(next);

        let filter = match self.category_idx {
            Some(idx) => CategoryFilter::Only(self.categories[idx].clone()),
            None => CategoryFilter::All,
        };
        self.session.set_category(filter);
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    fn toggle_selection(&mut self) {
        if let Some(symptom) = self.highlighted() {
            self.session.toggle_selection(symptom.id);
            self.needs_redraw = true;
        }
    }

    fn cycle_severity(&mut self, step: fn(Option<Severity>) -> Option<Severity>) {
        let Some(symptom) = self.highlighted() else {
            return;
        };
        if !self.session.selection().is_selected(symptom.id) {
            self.set_status(format!("✗ Select {} before rating it", symptom.name), MessageType::Error);
            return;
        }
        let next = step(self.session.selection().severity(symptom.id));
        self.session.set_severity(symptom.id, next);
        self.needs_redraw = true;
    }

    fn toggle_bookmark(&mut self) {
        let Some(symptom) = self.highlighted() else {
            return;
        };
        match self.session.toggle_bookmark(symptom.id) {
            Some(true) => self.set_status(format!("★ Bookmarked {}", symptom.name), MessageType::Success),
            Some(false) => {
                self.set_status(format!("Removed bookmark for {}", symptom.name), MessageType::Success)
            }
            None => {}
        }
    }

    fn analyze(&mut self) {
        match self.session.analyze() {
            Ok(results) => {
                let count = results.len();
                self.history_cursor = None;
                self.set_status(format!("✓ Analyzed {} symptoms", count), MessageType::Success);
            }
            Err(AnalysisError::NoSymptomsSelected) => {
                self.set_status("✗ Select at least one symptom (Space)", MessageType::Error);
            }
            Err(e) => self.set_status(format!("✗ {}", e), MessageType::Error),
        }
    }

    fn copy_report(&mut self) {
        let Some(report) = self.session.export_report(Utc::now()) else {
            self.set_status("✗ Nothing to copy: run an analysis first", MessageType::Error);
            return;
        };
        match copy_report(&report) {
            Ok(()) => self.set_status("✓ Report copied to clipboard", MessageType::Success),
            Err(e) => self.set_status(format!("✗ Clipboard error: {}", e), MessageType::Error),
        }
    }

    /// Restore the next older history entry, wrapping to the newest
    fn restore_next(&mut self) {
        let len = self.session.history().len();
        if len == 0 {
            self.set_status("✗ No saved analyses", MessageType::Error);
            return;
        }
        let cursor = self.history_cursor.map_or(0, |c| (c + 1) % len);
        let entry = &self.session.history()[cursor];
        let (entry_id, when) = (entry.id, format_timestamp(&entry.timestamp, &Utc::now()));

        if self.session.restore(entry_id) {
            self.history_cursor = Some(cursor);
            self.set_status(
                format!("↺ Restored analysis {}/{} ({})", cursor + 1, len, when),
                MessageType::Success,
            );
        }
    }

    fn update_search(&mut self, c: char, now: Instant) {
        if self.search_input.len() < MAX_SEARCH_LEN {
            self.search_input.push(c);
            self.session.input_search(self.search_input.clone(), now);
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self, now: Instant) {
        if self.search_input.pop().is_some() {
            self.session.input_search(self.search_input.clone(), now);
            self.needs_redraw = true;
        }
    }
}
