//! Menu toggle shown at the top of the drawer and, on narrow terminals, on
//! its own.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::{Theme, theme_helpers as th};

pub const MENU_ICON: &str = "≡";
pub const LOGO: &str = "pixie";

/// Menu icon followed by the logo while the drawer is expanded.
pub fn hamburger_line(theme: &dyn Theme, expanded: bool, style: Style) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("  {MENU_ICON}"), style)];
    if expanded {
        spans.push(Span::styled(
            format!("  {LOGO}"),
            style.fg(theme.roles().accent_primary).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans).style(style)
}

/// Draws the stand-alone menu icon used by the compact layout.
pub fn render_compact_toggle(frame: &mut Frame, area: Rect, theme: &dyn Theme, hovered: bool) {
    let style = th::sidebar_item_style(theme, false, hovered);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(format!("  {MENU_ICON}"), style))).style(style), area);
}
