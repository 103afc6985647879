//! Layout utilities shared by the screens

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate `text` to one line of `width` columns, marking the cut with an ellipsis
pub fn fit_line(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let lines = textwrap::wrap(text, width);
    match lines.len() {
        0 => String::new(),
        1 => lines[0].to_string(),
        _ => {
            let shorter = textwrap::wrap(text, width.saturating_sub(1).max(1));
            format!("{}…", shorter[0])
        }
    }
}
