use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    NextCategory,
    PrevCategory,
    ToggleSelection,
    SeverityUp,
    SeverityDown,
    ToggleBookmark,
    Analyze,
    CopyReport,
    RestoreHistory,
    ToggleDetail,
    UpdateSearch(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Navigation
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Tab, _) => Action::NextCategory,
        (KeyCode::BackTab, _) => Action::PrevCategory,

        // Selection
        (KeyCode::Char(' '), _) => Action::ToggleSelection,
        (KeyCode::Char(']'), _) => Action::SeverityUp,
        (KeyCode::Char('['), _) => Action::SeverityDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ToggleBookmark,

        // Analysis
        (KeyCode::Enter, _) => Action::Analyze,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyReport,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::RestoreHistory,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ToggleDetail,

        // Search input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::UpdateSearch(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_quit_actions() {
        assert_eq!(key_to_action(ctrl('c')), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn test_navigation() {
        assert_eq!(key_to_action(ctrl('p')), Action::MoveUp);
        assert_eq!(key_to_action(ctrl('n')), Action::MoveDown);
        assert_eq!(key_to_action(key(KeyCode::Up)), Action::MoveUp);
        assert_eq!(key_to_action(key(KeyCode::Down)), Action::MoveDown);
        assert_eq!(key_to_action(key(KeyCode::PageUp)), Action::PageUp);
        assert_eq!(key_to_action(key(KeyCode::PageDown)), Action::PageDown);
    }

    #[test]
    fn test_category_cycling() {
        assert_eq!(key_to_action(key(KeyCode::Tab)), Action::NextCategory);
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(key_to_action(back_tab), Action::PrevCategory);
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Action::ToggleSelection);
        assert_eq!(key_to_action(key(KeyCode::Char(']'))), Action::SeverityUp);
        assert_eq!(key_to_action(key(KeyCode::Char('['))), Action::SeverityDown);
        assert_eq!(key_to_action(ctrl('b')), Action::ToggleBookmark);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Analyze);
        assert_eq!(key_to_action(ctrl('y')), Action::CopyReport);
        assert_eq!(key_to_action(ctrl('r')), Action::RestoreHistory);
        assert_eq!(key_to_action(ctrl('d')), Action::ToggleDetail);
    }

    #[test]
    fn test_search_input() {
        assert_eq!(key_to_action(key(KeyCode::Char('h'))), Action::UpdateSearch('h'));
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(key_to_action(shift_a), Action::UpdateSearch('A'));
        assert_eq!(key_to_action(key(KeyCode::Backspace)), Action::DeleteChar);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(key_to_action(key(KeyCode::F(1))), Action::None);
    }
}
