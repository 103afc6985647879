//! Modal prompts drawn over the main screen

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::command_line::input_line;
use super::layout::{centered_rect, fit_line};
use crate::app::state::{EditPrompt, EditStep, Prompt};
use crate::theme::Theme;

const PROMPT_WIDTH: u16 = 52;
const PROMPT_HEIGHT: u16 = 7;

/// Draw the open prompt centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, prompt: &Prompt, theme: &Theme) {
    let rect = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
    frame.render_widget(Clear, rect);

    let (title, border_color) = match prompt {
        Prompt::ConfirmDelete { .. } => (" Delete book ", theme.warning),
        Prompt::Edit(_) => (" Edit book ", theme.border_focused),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines = match prompt {
        Prompt::ConfirmDelete { title, .. } => confirm_lines(title, inner.width, theme),
        Prompt::Edit(edit) => edit_lines(edit, theme),
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn confirm_lines(title: &str, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this book?",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(Span::styled(
            fit_line(&format!("\"{title}\""), usize::from(width)),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled("Yes  ", Style::default().fg(theme.fg_primary)),
            Span::styled("[n] ", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)),
            Span::styled("No", Style::default().fg(theme.fg_primary)),
        ]),
    ]
}

fn edit_lines(edit: &EditPrompt, theme: &Theme) -> Vec<Line<'static>> {
    let step = match edit.step {
        EditStep::Title => 1,
        EditStep::Author => 2,
        EditStep::Year => 3,
    };

    vec![
        Line::from(vec![
            Span::styled(edit.step.label(), Style::default().fg(theme.fg_primary)),
            Span::styled(format!(" ({step}/3)"), Style::default().fg(theme.fg_muted)),
        ]),
        input_line("> ", &edit.input, Style::default().fg(theme.fg_secondary), theme),
        Line::default(),
        Line::from(Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default().fg(theme.fg_muted),
        )),
    ]
}
