use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::models::{AnalysisResult, AnalysisSummary, Severity, SymptomId, SymptomRecord, UrgencyTier};
use crate::selection::SelectionState;

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const ERROR: Color = Color::Rgb(239, 68, 68);

/// Everything a frame needs, borrowed from the app for one draw
pub struct RenderState<'a> {
    pub search_input: &'a str,
    pub search_pending: bool,
    pub category: &'a str,
    pub symptoms: &'a [SymptomRecord],
    pub total_symptoms: usize,
    pub selected_idx: usize,
    pub selection: &'a SelectionState,
    pub bookmarks: &'a [SymptomId],
    pub results: &'a [AnalysisResult],
    pub summary: &'a AnalysisSummary,
    pub detailed: bool,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_search_box(frame, layout.search_area, state);
    render_symptom_list(frame, layout.list_area, state);
    render_detail(frame, layout.detail_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn bordered(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(title)
}

fn urgency_color(tier: UrgencyTier) -> Color {
    match tier {
        UrgencyTier::Critical => ERROR,
        UrgencyTier::High => Color::Rgb(249, 115, 22),
        UrgencyTier::Moderate => Color::Rgb(234, 179, 8),
        UrgencyTier::Low => ACCENT,
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = format!(" Search · category: {} ", state.category);
    let mut spans = vec![Span::styled("> ", Style::default().fg(ACCENT)), Span::raw(state.search_input)];
    if state.search_pending {
        spans.push(Span::styled(" …", Style::default().fg(MUTED)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(bordered(title));
    frame.render_widget(paragraph, area);
}

fn render_symptom_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let items: Vec<ListItem> = state
        .symptoms
        .iter()
        .enumerate()
        .map(|(idx, symptom)| {
            let selected = state.selection.is_selected(symptom.id);
            let check = if selected { "[x]" } else { "[ ]" };
            let star = if state.bookmarks.contains(&symptom.id) { "★" } else { " " };
            let severity = if selected {
                format!(" ({})", Severity::label_of(state.selection.severity(symptom.id)))
            } else {
                String::new()
            };
            let content =
                format!("{} {} {:<22} {}{}", check, star, symptom.name, symptom.category, severity);

            let style = if idx == state.selected_idx {
                Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(TEXT)
            } else {
                Style::default().fg(MUTED)
            };
            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(
        " Symptoms {}/{} · {} selected ",
        state.symptoms.len(),
        state.total_symptoms,
        state.selection.len()
    );
    // Offset follows the cursor so it stays visible past the first page
    let mut list_state = ListState::default();
    if !state.symptoms.is_empty() {
        list_state.select(Some(state.selected_idx.min(state.symptoms.len() - 1)));
    }
    frame.render_stateful_widget(List::new(items).block(bordered(title)), area, &mut list_state);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (title, text) = if state.results.is_empty() {
        (" Symptom ".to_string(), symptom_text(state))
    } else {
        let mode = if state.detailed { "detailed" } else { "compact" };
        (format!(" Analysis · {} ", mode), results_text(state))
    };

    let paragraph = Paragraph::new(text).block(bordered(title)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn label(name: &str) -> Span<'static> {
    Span::styled(format!("{}: ", name), Style::default().fg(MUTED))
}

fn symptom_text<'a>(state: &RenderState<'a>) -> Text<'a> {
    let Some(symptom) = state.symptoms.get(state.selected_idx) else {
        return Text::from("No symptom matches the search");
    };
    let selected = state.selection.is_selected(symptom.id);

    let mut lines = vec![
        Line::from(Span::styled(symptom.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![label("Category"), Span::raw(symptom.category.clone())]),
        Line::from(vec![label("Selected"), Span::raw(if selected { "yes" } else { "no" })]),
    ];
    if selected {
        lines.push(Line::from(vec![
            label("Severity"),
            Span::raw(Severity::label_of(state.selection.severity(symptom.id))),
        ]));
    }
    if state.bookmarks.contains(&symptom.id) {
        lines.push(Line::from(Span::styled("★ Bookmarked", Style::default().fg(ACCENT))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space: select  [ ]: severity  Enter: analyze",
        Style::default().fg(MUTED),
    )));
    Text::from(lines)
}

fn results_text<'a>(state: &RenderState<'a>) -> Text<'a> {
    let mut lines = Vec::new();

    for result in state.results {
        lines.push(Line::from(Span::styled(
            format!("{} · {}", result.name, result.severity_label()),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )));
        if result.conditions.is_empty() {
            lines.push(Line::from(Span::styled("  No associated conditions", Style::default().fg(MUTED))));
        }
        for condition in &result.conditions {
            let tier = condition.urgency.tier();
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", condition.condition)),
                Span::styled(format!("[{}]", condition.urgency), Style::default().fg(urgency_color(tier))),
                Span::styled(format!(" {}", condition.probability), Style::default().fg(MUTED)),
            ]));
            if state.detailed {
                lines.push(Line::from(Span::styled(
                    format!("    {}", condition.solution),
                    Style::default().fg(MUTED),
                )));
            }
        }
        if state.detailed {
            push_list(&mut lines, "Products", result.products.iter().cloned());
            push_list(&mut lines, "Devices", result.devices.iter().map(|d| format!("{} ({})", d.name, d.brand)));
            push_list(&mut lines, "Tests", result.tests.iter().map(|t| t.test.clone()));
            push_list(&mut lines, "Tips", result.tips.iter().cloned());
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("By category", Style::default().add_modifier(Modifier::BOLD))));
    for category in &state.summary.categories {
        lines.push(Line::from(format!("  {}: {}", category.category, category.count)));
    }
    lines.push(Line::from(Span::styled(
        format!("By urgency ({} conditions)", state.summary.total_conditions),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for urgency in &state.summary.urgency {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", urgency.tier), Style::default().fg(urgency_color(urgency.tier))),
            Span::raw(format!(": {}", urgency.count)),
        ]));
    }

    Text::from(lines)
}

fn push_list(lines: &mut Vec<Line<'_>>, title: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.collect();
    if !items.is_empty() {
        lines.push(Line::from(vec![label(title), Span::raw(items.join("; "))]));
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = match state.status_message {
        Some(message) => {
            let fg = match message.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => ERROR,
            };
            (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
        }
        None => (
            " Tab: category | Ctrl+B: bookmark | Ctrl+Y: copy | Ctrl+R: history | Ctrl+D: view | Esc: quit "
                .to_string(),
            Style::default().fg(TEXT).bg(BAR_BG),
        ),
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
