use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    SelectorNext,
    SelectorPrevious,
    Confirm,
    /// Open the search box so any character, `q` included, filters
    StartSearch,
    FilterPush(char),
    FilterPop,
    /// Clear the filter, or the selection when there is no filter
    Clear,
    NextPage,
    PreviousPage,
    /// Move scroll focus between the financial tables
    FocusNext,
    FocusPrevious,
    /// Forwarded to the focused panel
    Scroll(KeyCode),
}

/// Map a key press to an action. While `filter_active`, `q` and `/` type
/// into the search box instead of quitting or opening it.
pub fn map_key(key: KeyEvent, filter_active: bool) -> Option<AppAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(AppAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') if !filter_active => Some(AppAction::Quit),
        KeyCode::Char('/') if !filter_active => Some(AppAction::StartSearch),
        KeyCode::Char(c) => Some(AppAction::FilterPush(c)),
        KeyCode::Backspace => Some(AppAction::FilterPop),
        KeyCode::Down => Some(AppAction::SelectorNext),
        KeyCode::Up => Some(AppAction::SelectorPrevious),
        KeyCode::Enter => Some(AppAction::Confirm),
        KeyCode::Esc => Some(AppAction::Clear),
        KeyCode::Tab => Some(AppAction::NextPage),
        KeyCode::BackTab => Some(AppAction::PreviousPage),
        KeyCode::Right => Some(AppAction::FocusNext),
        KeyCode::Left => Some(AppAction::FocusPrevious),
        code @ (KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home | KeyCode::End) => {
            Some(AppAction::Scroll(code))
        }
        _ => None,
    }
}

/// Wait up to `timeout` for a key press from the terminal
pub fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}
