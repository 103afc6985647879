//! Key binding overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;
use crate::theme::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Shelves",
        &[
            ("↑/↓", "Select book"),
            ("←/→", "Switch shelf"),
            ("m, Space", "Move to the other shelf"),
            ("d, Del", "Delete book"),
            ("e, Enter", "Edit book"),
            ("Esc", "Clear search filter"),
        ],
    ),
    (
        "Forms",
        &[
            ("a", "Add a new book"),
            ("/", "Search by title"),
            ("Tab", "Next field or panel"),
            ("Space", "Toggle finished reading"),
            ("Enter", "Submit"),
        ],
    ),
    (
        "Commands",
        &[
            (":add", "title | author | year [| done]"),
            (":search", "Filter by title"),
            (":clear", "Show every book"),
            (":move :edit :delete", "<id>"),
            (":q", "Quit"),
        ],
    ),
];

const KEY_WIDTH: usize = 20;

/// Draw the help overlay centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme, vim_mode: bool) {
    let lines = help_lines(theme, vim_mode);
    let height = lines.len() as u16 + 2;
    let rect = centered_rect(60, height, area);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn help_lines(theme: &Theme, vim_mode: bool) -> Vec<Line<'static>> {
    let heading = Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(theme.accent_primary);
    let text_style = Style::default().fg(theme.fg_primary);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(*title, heading)));
        for (key, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<width$}", width = KEY_WIDTH), key_style),
                Span::styled(*description, text_style),
            ]));
        }
        lines.push(Line::default());
    }

    if vim_mode {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<width$}", "h/j/k/l g/G", width = KEY_WIDTH), key_style),
            Span::styled("Vim navigation", text_style),
        ]));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.fg_muted),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines.iter().map(|line| line.to_string()).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn lists_commands_and_keys() {
        let help = text(&help_lines(&Theme::default(), false));
        assert!(help.contains(":add"));
        assert!(help.contains("Move to the other shelf"));
        assert!(!help.contains("Vim navigation"));
    }

    #[test]
    fn vim_keys_listed_in_vim_mode() {
        let help = text(&help_lines(&Theme::default(), true));
        assert!(help.contains("Vim navigation"));
    }
}
