//! Overlay listing the registered keyboard shortcuts.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use pixie_types::Effect;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Clear, Paragraph, Wrap},
};

use super::content::build_shortcuts_text;
use crate::app::App;
use crate::ui::{
    components::component::Component,
    theme::theme_helpers as th,
    utils::contains,
};

/// Modal opened by the `show-help` shortcut. Fills the area the main view
/// lays out for it.
///
/// Closes on `Esc` or `?`, and on a click outside the overlay.
#[derive(Debug, Default)]
pub struct KeyboardShortcutsComponent {
    last_area: Rect,
}

impl Component for KeyboardShortcutsComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => vec![Effect::CloseModal],
            _ => vec![],
        }
    }

    fn handle_mouse_events(&mut self, _app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if !contains(self.last_area, mouse.column, mouse.row) => {
                vec![Effect::CloseModal]
            }
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Keyboard Shortcuts  [Esc] Close"), true);

        frame.render_widget(Clear, area);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let paragraph = Paragraph::new(build_shortcuts_text(theme, &app.shortcuts))
            .style(theme.text_primary_style())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
        self.last_area = area;
    }
}
