//! Main screen: forms on the left, both shelves on the right

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::form::{self, ADD_FORM_HEIGHT, SEARCH_HEIGHT};
use super::{command_line, shelf_list};
use crate::app::state::{AppState, Focus};
use crate::shelf::{Shelf, ShelfView};
use crate::theme::Theme;

/// Width limits for the side panel
const SIDE_MIN_WIDTH: u16 = 30;
const SIDE_MAX_WIDTH: u16 = 44;

/// Areas of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub add_form: Rect,
    pub search: Rect,
    pub hints: Rect,
    pub in_progress: Rect,
    pub completed: Rect,
    pub command_line: Rect,
}

impl ScreenLayout {
    pub fn shelf(&self, shelf: Shelf) -> Rect {
        match shelf {
            Shelf::InProgress => self.in_progress,
            Shelf::Completed => self.completed,
        }
    }
}

/// Split the terminal into the main screen areas
pub fn screen_layout(area: Rect) -> ScreenLayout {
    // Split vertically: main area and command line
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let side_width = (vertical[0].width / 3).clamp(SIDE_MIN_WIDTH, SIDE_MAX_WIDTH);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(side_width), Constraint::Min(30)])
        .split(vertical[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ADD_FORM_HEIGHT),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    let shelves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    ScreenLayout {
        add_form: side[0],
        search: side[1],
        hints: side[2],
        in_progress: shelves[0],
        completed: shelves[1],
        command_line: vertical[1],
    }
}

/// Draw the main screen
pub fn draw(
    frame: &mut Frame,
    state: &mut AppState,
    view: &ShelfView,
    query: Option<&str>,
    theme: &Theme,
) {
    let layout = screen_layout(frame.area());

    form::draw_add_form(
        frame,
        layout.add_form,
        &state.add_form,
        theme,
        state.focus == Focus::AddForm,
    );
    form::draw_search(
        frame,
        layout.search,
        &state.search,
        query,
        theme,
        state.focus == Focus::Search,
    );
    draw_hints(frame, layout.hints, state.focus, theme);

    for shelf in [Shelf::InProgress, Shelf::Completed] {
        let focused = state.focus == Focus::Shelves && state.selected_shelf == shelf;
        shelf_list::draw(frame, layout.shelf(shelf), shelf, view.shelf(shelf), state, theme, focused);
    }

    command_line::draw(frame, layout.command_line, &state.command_line, theme);
}

fn draw_hints(frame: &mut Frame, area: Rect, focus: Focus, theme: &Theme) {
    let hints: &[(&str, &str)] = match focus {
        Focus::Shelves => &[
            ("m", "move"),
            ("d", "delete"),
            ("e", "edit"),
            ("a", "add"),
            ("/", "search"),
            ("?", "help"),
        ],
        Focus::AddForm => {
            &[("Tab", "next field"), ("Space", "finished"), ("Enter", "add"), ("Esc", "back")]
        }
        Focus::Search => &[("Enter", "search"), ("Esc", "back")],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(theme.accent_primary)),
                Span::styled(format!(" {label}  "), Style::default().fg(theme.fg_muted)),
            ]
        })
        .collect();

    let hints = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(hints, area.inner(Margin::new(1, 0)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_side_panel_and_shelves() {
        let layout = screen_layout(Rect::new(0, 0, 120, 40));

        assert_eq!(layout.add_form.width, 40);
        assert_eq!(layout.add_form.height, ADD_FORM_HEIGHT);
        assert_eq!(layout.search.y, ADD_FORM_HEIGHT);
        assert_eq!(layout.in_progress.x, 40);
        assert_eq!(layout.in_progress.width, 40);
        assert_eq!(layout.completed.x, 80);
        assert_eq!(layout.command_line, Rect::new(0, 39, 120, 1));
    }

    #[test]
    fn side_panel_width_is_clamped() {
        assert_eq!(screen_layout(Rect::new(0, 0, 80, 24)).add_form.width, SIDE_MIN_WIDTH);
        assert_eq!(screen_layout(Rect::new(0, 0, 240, 60)).add_form.width, SIDE_MAX_WIDTH);
    }

    #[test]
    fn shelves_fill_the_main_area() {
        let layout = screen_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.add_form.width, 33);
        assert_eq!(layout.in_progress.height, 29);
        assert_eq!(layout.in_progress.width + layout.completed.width, 67);
    }
}
