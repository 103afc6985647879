//! Command line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{CommandLineState, CommandMode, TextInput};
use crate::theme::Theme;

/// Draw the command line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, theme: &Theme) {
    let line = match state.mode {
        CommandMode::Normal => {
            // Show message or a hint when empty
            if let Some(ref msg) = state.message {
                let style = if state.is_error {
                    Style::default().fg(theme.error)
                } else {
                    Style::default().fg(theme.fg_muted)
                };
                Line::from(Span::styled(msg.clone(), style))
            } else {
                Line::from(Span::styled(
                    "Press : for commands, ? for help",
                    Style::default().fg(theme.fg_muted),
                ))
            }
        }
        CommandMode::Command => {
            input_line(":", &state.input, Style::default().fg(theme.accent_primary), theme)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// A text field after `prefix`, with the cursor drawn in place
pub fn input_line(prefix: &str, input: &TextInput, style: Style, theme: &Theme) -> Line<'static> {
    let value = input.value();
    let split = value.char_indices().nth(input.cursor).map_or(value.len(), |(i, _)| i);
    let (before, rest) = value.split_at(split);

    // The cursor sits on the next character, or on a blank past the end
    let mut rest = rest.chars();
    let under_cursor = rest.next().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);

    let head = format!("{prefix}{before}");
    let mut spans = Vec::with_capacity(3);
    if !head.is_empty() {
        spans.push(Span::styled(head, style));
    }
    spans.push(Span::styled(under_cursor.to_string(), cursor_style));
    if !rest.as_str().is_empty() {
        spans.push(Span::styled(rest.as_str().to_string(), style));
    }

    Line::from(spans)
}
