//! Layout and text helpers shared by the UI components.

use ratatui::layout::Position;
use ratatui::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Creates a centered rectangular area within a given rectangle.
///
/// `percent_x` and `percent_y` size the result relative to `r`; the overlay
/// helpers use it to place modal dialogs.
///
/// ```rust,ignore
/// let parent = Rect::new(0, 0, 100, 50);
/// let centered = centered_rect(80, 70, parent);
/// ```
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Places a `width` x `height` popup at the bottom-right corner of `anchor`,
/// shifted left and up as needed so it stays inside `bounds`.
pub fn anchored_rect(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let x = anchor.right().min(bounds.right().saturating_sub(width)).max(bounds.x);
    let y = anchor.bottom().min(bounds.bottom().saturating_sub(height)).max(bounds.y);
    Rect::new(x, y, width, height)
}

/// Whether the cell at (`x`, `y`) lies inside `area`.
pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    area.contains(Position::new(x, y))
}

/// Cuts `text` to at most `max_width` display columns, ending with `…` when
/// something was removed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut truncated = String::new();
    let mut used = 0;
    for character in text.chars() {
        let width = character.width().unwrap_or(0);
        if used + width + 1 > max_width {
            break;
        }
        truncated.push(character);
        used += width;
    }
    truncated.push('…');
    truncated
}
