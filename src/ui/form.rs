//! Add-book form and search box

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::command_line::input_line;
use crate::app::state::{AddFormState, FormField, TextInput};
use crate::shelf::Shelf;
use crate::theme::Theme;

/// Rows the add form needs, borders included
pub const ADD_FORM_HEIGHT: u16 = 7;

/// Rows the search box needs, borders included
pub const SEARCH_HEIGHT: u16 = 3;

/// Width of the field labels
const LABEL_WIDTH: usize = 8;

fn panel<'a>(title: &'a str, theme: &Theme, focused: bool) -> Block<'a> {
    let border_color = if focused { theme.border_focused } else { theme.border };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary))
}

/// Draw the add-book form
pub fn draw_add_form(
    frame: &mut Frame,
    area: Rect,
    form: &AddFormState,
    theme: &Theme,
    focused: bool,
) {
    let block = panel(" Add a new book ", theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = [FormField::Title, FormField::Author, FormField::Year]
        .into_iter()
        .filter_map(|field| {
            let input = form.input(field)?;
            let active = focused && form.field == field;
            Some(field_line(field, input, active, theme))
        })
        .collect();

    let checkbox = if form.is_complete { "[x]" } else { "[ ]" };
    let checkbox_style = if focused && form.field == FormField::Complete {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_primary)
    };
    lines.push(Line::from(Span::styled(
        format!("{checkbox} {}", FormField::Complete.label()),
        checkbox_style,
    )));

    lines.push(Line::from(Span::styled(
        format!("< {} >", form.submit_label()),
        Style::default().fg(theme.shelf_color(Shelf::of(form.is_complete))),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(field: FormField, input: &TextInput, active: bool, theme: &Theme) -> Line<'static> {
    let label = format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH);

    if active {
        input_line(&label, input, Style::default().fg(theme.fg_secondary), theme)
    } else {
        Line::from(vec![
            Span::styled(label, Style::default().fg(theme.fg_muted)),
            Span::styled(input.value().to_string(), Style::default().fg(theme.fg_primary)),
        ])
    }
}

/// Draw the search-by-title box
pub fn draw_search(
    frame: &mut Frame,
    area: Rect,
    search: &TextInput,
    query: Option<&str>,
    theme: &Theme,
    focused: bool,
) {
    let title = if query.is_some() { " Search by title (filtered) " } else { " Search by title " };
    let block = panel(title, theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if focused {
        input_line("> ", search, Style::default().fg(theme.info), theme)
    } else if search.is_empty() {
        Line::from(Span::styled("> press / to search", Style::default().fg(theme.fg_muted)))
    } else {
        Line::from(Span::styled(format!("> {}", search.value()), Style::default().fg(theme.info)))
    };

    frame.render_widget(Paragraph::new(line), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(form: &AddFormState, focused: bool) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, ADD_FORM_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_add_form(frame, area, form, &theme, focused);
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn form_shows_fields_and_submit_label() {
        let mut form = AddFormState::default();
        form.title.set("Dune");

        let text = render(&form, false);
        assert!(text.contains("Title:  Dune"));
        assert!(text.contains("[ ] Finished reading"));
        assert!(text.contains("Add to shelf: not finished yet"));
    }

    #[test]
    fn checked_form_changes_label() {
        let mut form = AddFormState::default();
        form.toggle_complete();

        let text = render(&form, true);
        assert!(text.contains("[x] Finished reading"));
        assert!(text.contains("Add to shelf: finished"));
    }
}
