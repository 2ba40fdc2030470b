use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the symptom picker
pub struct AppLayout {
    pub search_area: Rect,
    pub list_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Split the screen:
    /// - Search box: 3 rows on top
    /// - Symptom list: 60% width (left), detail pane: 40% (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box with borders
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            list_area: horizontal_chunks[0],
            detail_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}
