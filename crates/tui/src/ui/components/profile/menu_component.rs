use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use pixie_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use tracing::warn;

use super::profile_component::{avatar_span, profile_fields};
use super::state::{ADMIN_PATH, LOGOUT_PATH, ProfileMenuAction};
use crate::app::App;
use crate::shortcuts::SHOW_HELP;
use crate::ui::{
    components::Component,
    theme::theme_helpers as th,
    utils::{anchored_rect, truncate_with_ellipsis},
};

const MENU_WIDTH: u16 = 32;
/// Borders, two header lines, a divider and one line per action.
const MENU_HEIGHT: u16 = 2 + 3 + ProfileMenuAction::ALL.len() as u16;

/// Dropdown opened from the profile row.
///
/// Shows the user's avatar, name and email above the Admin, Keyboard
/// Shortcuts and Logout actions. Choosing an action or clicking outside the
/// menu closes it.
#[derive(Debug, Default)]
pub struct ProfileMenuComponent;

impl ProfileMenuComponent {
    /// Closes the menu and returns the effects of `action`.
    pub fn choose(&self, app: &mut App, action: ProfileMenuAction) -> Vec<Effect> {
        app.profile_menu.close();
        match action {
            ProfileMenuAction::Admin => vec![Effect::Navigate(ADMIN_PATH.to_string())],
            ProfileMenuAction::KeyboardShortcuts => app.shortcuts.invoke(SHOW_HELP).unwrap_or_else(|error| {
                warn!(%error, "keyboard shortcuts action unavailable");
                Vec::new()
            }),
            ProfileMenuAction::Logout => vec![Effect::Navigate(LOGOUT_PATH.to_string())],
        }
    }
}

impl Component for ProfileMenuComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => app.profile_menu.close(),
            KeyCode::Up | KeyCode::BackTab => app.profile_menu.highlight_prev(),
            KeyCode::Down | KeyCode::Tab => app.profile_menu.highlight_next(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let action = app.profile_menu.highlighted_action();
                return self.choose(app, action);
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(index) = app
                    .profile_menu
                    .action_at(x, y)
                    .and_then(|action| ProfileMenuAction::ALL.iter().position(|candidate| *candidate == action))
                {
                    app.profile_menu.highlighted = index;
                }
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => match app.profile_menu.action_at(x, y) {
                Some(action) => self.choose(app, action),
                None => {
                    if !app.profile_menu.contains(x, y) {
                        app.profile_menu.close();
                    }
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let Some(anchor) = app.profile_menu.anchor() else {
            return;
        };
        let theme = &*app.ctx.theme;
        let area = anchored_rect(anchor, MENU_WIDTH, MENU_HEIGHT, rect);
        frame.render_widget(Clear, area);

        let block = th::block(theme, None, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (name, email, _) = profile_fields(app.sidebar.profile.as_ref());
        let text_width = usize::from(inner.width).saturating_sub(6);
        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)];
        constraints.extend(ProfileMenuAction::ALL.iter().map(|_| Constraint::Length(1)));
        let rows = Layout::vertical(constraints).split(inner);

        let header = Line::from(vec![
            Span::raw(" "),
            avatar_span(theme, name),
            Span::styled(
                format!(" {}", truncate_with_ellipsis(name, text_width)),
                theme.text_primary_style().add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);
        let email_line = Line::from(Span::styled(
            format!("     {}", truncate_with_ellipsis(email, text_width)),
            theme.text_muted_style(),
        ));
        frame.render_widget(Paragraph::new(email_line), rows[1]);
        frame.render_widget(
            Paragraph::new("─".repeat(usize::from(inner.width))).style(th::divider_style(theme)),
            rows[2],
        );

        let mut item_areas = Vec::with_capacity(ProfileMenuAction::ALL.len());
        for (index, action) in ProfileMenuAction::ALL.iter().enumerate() {
            let Some(row) = rows.get(3 + index).copied() else {
                break;
            };
            let style = if index == app.profile_menu.highlighted {
                theme.selection_style()
            } else {
                th::panel_style(theme)
            };
            let line = Line::from(format!(" {}  {}", action.icon(), action.label())).style(style);
            frame.render_widget(Paragraph::new(line).style(style), row);
            item_areas.push(row);
        }

        app.profile_menu.last_area = area;
        app.profile_menu.item_areas = item_areas;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crossterm::event::{KeyEventKind, KeyModifiers};
    use pixie_types::Modal;

    use super::*;
    use crate::app::test_support::{app_with_shortcuts, test_app};
    use crate::shortcuts::{KeyBinding, NEXT_CLUSTER, Shortcut, ShortcutRegistry, TOGGLE_SIDEBAR};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn admin_and_logout_navigate_and_close() {
        let mut app = test_app();
        let mut menu = ProfileMenuComponent;

        app.profile_menu.open_at(Rect::new(0, 20, 29, 2));
        assert_eq!(menu.handle_key_events(&mut app, press(KeyCode::Enter)), vec![Effect::Navigate("/admin".into())]);
        assert!(!app.profile_menu.is_open());
        assert_eq!(app.profile_menu.anchor(), None);

        app.profile_menu.open_at(Rect::new(0, 20, 29, 2));
        menu.handle_key_events(&mut app, press(KeyCode::Up));
        assert_eq!(menu.handle_key_events(&mut app, press(KeyCode::Enter)), vec![Effect::Navigate("/logout".into())]);
    }

    #[test]
    fn escape_closes_without_effects() {
        let mut app = test_app();
        app.profile_menu.open_at(Rect::new(0, 20, 29, 2));
        assert!(ProfileMenuComponent.handle_key_events(&mut app, press(KeyCode::Esc)).is_empty());
        assert!(!app.profile_menu.is_open());
    }

    #[test]
    fn keyboard_shortcuts_invokes_only_show_help() {
        let help_calls = Arc::new(AtomicUsize::new(0));
        let other_calls = Arc::new(AtomicUsize::new(0));
        let registry = {
            let help_calls = Arc::clone(&help_calls);
            let toggle_calls = Arc::clone(&other_calls);
            let cluster_calls = Arc::clone(&other_calls);
            ShortcutRegistry::builder()
                .shortcut(Shortcut::new(SHOW_HELP, KeyBinding::plain('?'), "Help", move || {
                    help_calls.fetch_add(1, Ordering::SeqCst);
                    vec![Effect::ShowModal(Modal::KeyboardShortcuts)]
                }))
                .shortcut(Shortcut::new(TOGGLE_SIDEBAR, KeyBinding::ctrl('b'), "Toggle", move || {
                    toggle_calls.fetch_add(1, Ordering::SeqCst);
                    Vec::new()
                }))
                .shortcut(Shortcut::new(NEXT_CLUSTER, KeyBinding::ctrl('n'), "Next", move || {
                    cluster_calls.fetch_add(1, Ordering::SeqCst);
                    Vec::new()
                }))
                .build()
                .expect("registry")
        };
        let mut app = app_with_shortcuts(registry);
        let mut menu = ProfileMenuComponent;

        let clicks = 5;
        for _ in 0..clicks {
            app.profile_menu.open_at(Rect::new(0, 20, 29, 2));
            menu.handle_key_events(&mut app, press(KeyCode::Down));
            let effects = menu.handle_key_events(&mut app, press(KeyCode::Enter));
            assert_eq!(effects, vec![Effect::ShowModal(Modal::KeyboardShortcuts)]);
            assert!(!app.profile_menu.is_open());
        }

        assert_eq!(help_calls.load(Ordering::SeqCst), clicks);
        assert_eq!(other_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clicking_outside_closes_the_menu() {
        use ratatui::{Terminal, backend::TestBackend};

        let mut app = test_app();
        let mut menu = ProfileMenuComponent;
        app.profile_menu.open_at(Rect::new(0, 20, 29, 2));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                menu.render(frame, area, &mut app);
            })
            .expect("draw");
        let menu_area = app.profile_menu.last_area;
        assert_eq!(menu_area.x, 29);
        assert!(menu_area.bottom() <= 30);

        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let logout_row = app.profile_menu.item_areas[2];
        assert_eq!(
            menu.handle_mouse_events(&mut app, click(logout_row.x + 1, logout_row.y)),
            vec![Effect::Navigate("/logout".into())]
        );

        app.profile_menu.open_at(Rect::new(0, 20, 29, 2));
        assert!(menu.handle_mouse_events(&mut app, click(90, 1)).is_empty());
        assert!(!app.profile_menu.is_open());
    }
}
