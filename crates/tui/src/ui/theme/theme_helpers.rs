use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(
            t,
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Horizontal rules inside menus.
pub fn divider_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, divider, .. } = *theme.roles();
    Style::default().bg(surface).fg(divider)
}

/// Background of the drawer itself.
pub fn sidebar_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { sidebar, text, .. } = *theme.roles();
    Style::default().bg(sidebar).fg(text)
}

/// Style of the one-column shadow separating the drawer from the content.
pub fn sidebar_shadow_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles {
        sidebar, sidebar_shadow, ..
    } = *theme.roles();
    Style::default().bg(sidebar).fg(sidebar_shadow)
}

/// Style of a drawer row. Focused rows are highlighted, hovered rows get the
/// muted surface.
pub fn sidebar_item_style<T: Theme + ?Sized>(theme: &T, focused: bool, hovered: bool) -> Style {
    if focused {
        return theme.selection_style().add_modifier(Modifier::BOLD);
    }
    let ThemeRoles {
        sidebar,
        surface_muted,
        text_secondary,
        ..
    } = *theme.roles();
    let bg = if hovered { surface_muted } else { sidebar };
    Style::default().bg(bg).fg(text_secondary)
}

/// Style for tooltip labels shown next to the collapsed drawer.
pub fn tooltip_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles {
        surface_muted, text, ..
    } = *theme.roles();
    Style::default().bg(surface_muted).fg(text)
}

/// Style for keyboard hints such as `Ctrl+B`.
pub fn key_hint_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.accent_emphasis_style()
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let dr = (r as f32 * f).round().clamp(0.0, 255.0) as u8;
            let dg = (g as f32 * f).round().clamp(0.0, 255.0) as u8;
            let db = (b as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(dr, dg, db)
        }
        other => other,
    }
}

/// Move an RGB color toward white by `amount` (0.0..=1.0).
pub fn lighten_rgb(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = amount.clamp(0.0, 1.0);
            let lift = |channel: u8| (channel as f32 + (255.0 - channel as f32) * a).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(lift(r), lift(g), lift(b))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_and_lighten_only_touch_rgb() {
        assert_eq!(darken_rgb(Color::Rgb(100, 50, 10), 0.5), Color::Rgb(50, 25, 5));
        assert_eq!(lighten_rgb(Color::Rgb(0, 0, 0), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(darken_rgb(Color::Indexed(12), 0.5), Color::Indexed(12));
        assert_eq!(lighten_rgb(Color::Reset, 0.5), Color::Reset);
    }
}
