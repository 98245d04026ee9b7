//! Text of the keyboard shortcuts overlay.

use ratatui::{
    style::Modifier,
    text::{Line, Span, Text},
};
use unicode_width::UnicodeWidthStr;

use crate::shortcuts::ShortcutRegistry;
use crate::ui::theme::{Theme, theme_helpers as th};

/// One line per registered shortcut, keys right-aligned in a shared column,
/// in registration order.
pub(crate) fn build_shortcuts_text<'a>(theme: &dyn Theme, shortcuts: &'a ShortcutRegistry) -> Text<'a> {
    let keys: Vec<String> = shortcuts.iter().map(|shortcut| shortcut.display_keys()).collect();
    let key_width = keys.iter().map(|key| key.width()).max().unwrap_or(0);

    let mut lines = vec![
        Line::from(""),
        Line::styled(" SHORTCUTS:", theme.text_secondary_style().add_modifier(Modifier::BOLD)),
    ];
    for (shortcut, key) in shortcuts.iter().zip(keys) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:>key_width$}"), th::key_hint_style(theme)),
            Span::styled("  ", theme.text_muted_style()),
            Span::styled(shortcut.description.as_str(), theme.text_primary_style()),
        ]));
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::dracula::DraculaTheme;

    #[test]
    fn lists_every_shortcut_in_order() {
        let registry = ShortcutRegistry::default();
        let text = build_shortcuts_text(&DraculaTheme::new(), &registry);
        let rendered: Vec<String> = text
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();

        assert_eq!(rendered.len(), 2 + 3);
        assert_eq!(rendered[2], "       ?  Show keyboard shortcuts");
        assert_eq!(rendered[3], "  Ctrl+B  Expand or collapse the sidebar");
        assert_eq!(rendered[4], "  Ctrl+N  Switch to the next cluster");
    }
}
