//! Theming system for Bookshelf

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::app::input::ActionKind;
use crate::shelf::Shelf;

/// A color theme for the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Shelf headings
    pub shelf_in_progress: Color,
    pub shelf_completed: Color,

    // Per-book action buttons
    pub button_toggle: Color,
    pub button_delete: Color,
    pub button_edit: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Theme {
    /// Built-in theme called `name`, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        let theme = Self::tokyo_night();
        theme.name.eq_ignore_ascii_case(name.trim()).then_some(theme)
    }

    /// Heading color for a shelf
    pub fn shelf_color(&self, shelf: Shelf) -> Color {
        match shelf {
            Shelf::InProgress => self.shelf_in_progress,
            Shelf::Completed => self.shelf_completed,
        }
    }

    /// Background color of an action button
    pub fn button_color(&self, kind: ActionKind) -> Color {
        match kind {
            ActionKind::Toggle => self.button_toggle,
            ActionKind::Delete => self.button_delete,
            ActionKind::Edit => self.button_edit,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
