//! One shelf of book cards
//!
//! Each card shows the title, author and year followed by a row of action
//! buttons. Every button drawn registers a hit region so mouse clicks can be
//! dispatched by action kind and book id.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::fit_line;
use crate::app::input::{ActionKind, ShelfAction};
use crate::app::state::{AppState, HitRegion};
use crate::shelf::{Book, Shelf};
use crate::theme::Theme;

/// Rows per card: title, author, year, buttons, spacer
pub const CARD_HEIGHT: u16 = 5;

/// Row of the buttons within a card
const BUTTON_ROW: u16 = 3;

/// Draw one shelf
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    shelf: Shelf,
    books: &[Book],
    state: &mut AppState,
    theme: &Theme,
    focused: bool,
) {
    let border_color = if focused { theme.border_focused } else { theme.border };
    let heading = Span::styled(
        format!(" {} ({}) ", shelf.title(), books.len()),
        Style::default().fg(theme.shelf_color(shelf)).add_modifier(Modifier::BOLD),
    );

    let block = Block::default()
        .title(heading)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if books.is_empty() {
        let msg = Paragraph::new("No books on this shelf")
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    let list = state.list_mut(shelf);
    list.visible_books = usize::from((inner.height / CARD_HEIGHT).max(1));
    list.clamp(books.len());
    list.ensure_selection_visible();
    let (selected, offset, visible) = (list.selected, list.scroll_offset, list.visible_books);

    for (row, (index, book)) in books.iter().enumerate().skip(offset).take(visible).enumerate() {
        let y = inner.y + row as u16 * CARD_HEIGHT;
        let height = (CARD_HEIGHT - 1).min(inner.bottom().saturating_sub(y));
        let card = Rect::new(inner.x, y, inner.width, height);

        draw_card(frame, card, book, focused && index == selected, theme);

        if card.height > BUTTON_ROW {
            let button_row = Rect::new(card.x, card.y + BUTTON_ROW, card.width, 1);
            for (area, action) in button_regions(button_row, book) {
                state.hit_regions.push(HitRegion { area, action });
            }
        }
    }
}

/// Action buttons of a card, in display order
pub fn buttons(book: &Book) -> [(ActionKind, &'static str); 3] {
    let toggle = if book.is_complete { "Not finished" } else { "Finished" };
    [(ActionKind::Toggle, toggle), (ActionKind::Delete, "Delete"), (ActionKind::Edit, "Edit")]
}

/// Screen areas of the buttons that fit in `row`
pub fn button_regions(row: Rect, book: &Book) -> Vec<(Rect, ShelfAction)> {
    let mut regions = Vec::new();
    let mut x = row.x;

    for (kind, label) in buttons(book) {
        let width = label.chars().count() as u16 + 2;
        if x + width > row.right() {
            break;
        }
        regions.push((Rect::new(x, row.y, width, 1), ShelfAction::new(kind, book.id())));
        x += width + 1;
    }

    regions
}

fn draw_card(frame: &mut Frame, area: Rect, book: &Book, selected: bool, theme: &Theme) {
    let width = area.width as usize;
    let marker = if selected { "▌" } else { " " };

    let title_style = if selected {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD)
    };

    let mut button_spans = Vec::new();
    for (kind, label) in buttons(book) {
        button_spans.push(Span::styled(
            format!(" {label} "),
            Style::default().fg(theme.bg_primary).bg(theme.button_color(kind)),
        ));
        button_spans.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent_primary)),
            Span::styled(fit_line(&book.title, width.saturating_sub(1)), title_style),
        ]),
        Line::from(Span::styled(
            fit_line(&format!(" Author: {}", book.author), width),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(Span::styled(format!(" Year: {}", book.year), Style::default().fg(theme.fg_muted))),
        Line::from(button_spans),
    ];

    let style = if selected { Style::default().bg(theme.selection) } else { Style::default() };
    frame.render_widget(Paragraph::new(lines).style(style), area);
}
