//! Key mapping and shelf actions

use crossterm::event::{KeyCode, KeyModifiers};

use crate::shelf::BookId;

/// Marker for the three per-book actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Move the book to the other shelf
    Toggle,
    /// Delete the book (after confirmation)
    Delete,
    /// Edit title, author and year
    Edit,
}

/// A per-book action, dispatched the same way whether it came from a key,
/// a mouse click on a button, or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfAction {
    pub kind: ActionKind,
    pub id: BookId,
}

impl ShelfAction {
    pub fn new(kind: ActionKind, id: BookId) -> Self {
        Self { kind, id }
    }
}

/// Actions available while the shelves have focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,

    // Per-book
    Book(ActionKind),

    // Focus
    FocusAddForm,
    FocusSearch,
    NextFocus,
    PrevFocus,

    /// Drop the search filter and show every book
    ClearFilter,
    CommandMode,
    Help,
    Quit,
}

/// Map a key pressed on the shelves to an action
pub fn shelf_key_to_action(key: KeyCode, modifiers: KeyModifiers, vim_mode: bool) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    if vim_mode {
        match key {
            KeyCode::Char('j') => return Some(Action::Down),
            KeyCode::Char('k') => return Some(Action::Up),
            KeyCode::Char('h') => return Some(Action::Left),
            KeyCode::Char('l') => return Some(Action::Right),
            KeyCode::Char('g') => return Some(Action::Top),
            KeyCode::Char('G') => return Some(Action::Bottom),
            _ => {}
        }
    }

    match key {
        KeyCode::Down => Some(Action::Down),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Home => Some(Action::Top),
        KeyCode::End => Some(Action::Bottom),
        KeyCode::Char('m') | KeyCode::Char(' ') => Some(Action::Book(ActionKind::Toggle)),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::Book(ActionKind::Delete)),
        KeyCode::Char('e') | KeyCode::Enter => Some(Action::Book(ActionKind::Edit)),
        KeyCode::Char('a') => Some(Action::FocusAddForm),
        KeyCode::Char('/') => Some(Action::FocusSearch),
        KeyCode::Tab => Some(Action::NextFocus),
        KeyCode::BackTab => Some(Action::PrevFocus),
        KeyCode::Esc => Some(Action::ClearFilter),
        KeyCode::Char(':') => Some(Action::CommandMode),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
