use crossterm::event::{KeyEvent, MouseEvent};
use pixie_types::{Effect, Modal, Msg};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Clear, Paragraph},
};

use super::components::hamburger::render_compact_toggle;
use super::components::sidebar::shell_layout;
use super::components::{Component, ContentComponent, KeyboardShortcutsComponent, ProfileMenuComponent, SidebarComponent};
use super::utils::centered_rect;
use crate::app::App;

pub struct ModalLayout(Box<dyn Fn(Rect) -> Rect>);

impl std::fmt::Debug for ModalLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModalLayout")
    }
}

type ModalView = (Box<dyn Component>, ModalLayout);

/// Root component: the application shell.
///
/// Routes input to the open modal, then the profile menu, then the global
/// shortcuts, and finally the sidebar.
#[derive(Default)]
pub struct MainView {
    pub sidebar_view: SidebarComponent,
    pub content_view: ContentComponent,
    pub menu_view: ProfileMenuComponent,
    /// Currently open modal component
    pub modal_view: Option<ModalView>,

    /// the widget_id of the focus just before a modal is opened
    transient_focus_id: Option<usize>,
}

impl MainView {
    /// Update the open modal kind (use None to clear).
    pub fn set_open_modal_kind(&mut self, app: &mut App, modal: Option<Modal>) {
        if let Some(modal_kind) = modal {
            let modal_view: ModalView = match modal_kind {
                Modal::KeyboardShortcuts => (
                    Box::new(KeyboardShortcutsComponent::default()),
                    ModalLayout(Box::new(|rect| centered_rect(60, 50, rect))),
                ),
            };
            self.modal_view = Some(modal_view);
            // save the current focus to restore when the modal is closed
            self.transient_focus_id = app.focus.focused().map(|focus| focus.widget_id());
        } else {
            self.modal_view = None;
        }
        app.open_modal = modal;
    }

    pub fn restore_focus(&mut self, app: &mut App) {
        if let Some(id) = self.transient_focus_id
            && app.open_modal.is_none()
        {
            app.focus.by_widget_id(id);
            self.transient_focus_id = None;
        } else {
            app.focus.first();
        }
    }

    /// Applies a local effect to `App` and keeps the modal view in sync with
    /// it. Returns follow-up effects.
    pub fn apply_local_effect(&mut self, app: &mut App, effect: Effect) -> Vec<Effect> {
        let follow_up = app.apply_local_effect(&effect);
        match effect {
            Effect::ShowModal(modal) => self.set_open_modal_kind(app, Some(modal)),
            Effect::CloseModal => {
                self.set_open_modal_kind(app, None);
                self.restore_focus(app);
            }
            _ => {}
        }
        follow_up
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        let mut effects = app.update(&msg);
        if let Some((modal, _)) = self.modal_view.as_mut() {
            effects.extend(modal.handle_message(app, msg));
        }
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some(target) = self.modal_view.as_mut() {
            return target.0.handle_key_events(app, key);
        }

        if app.profile_menu.is_open() {
            return self.menu_view.handle_key_events(app, key);
        }

        if let Some(shortcut) = app.shortcuts.action_for_key(&key) {
            return shortcut.invoke();
        }

        self.sidebar_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let Some(target) = self.modal_view.as_mut() {
            return target.0.handle_mouse_events(app, mouse);
        }

        if app.profile_menu.is_open() {
            return self.menu_view.handle_mouse_events(app, mouse);
        }

        self.sidebar_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = shell_layout(area, app.sidebar.drawer);
        self.content_view.render(frame, layout.content, app);

        match layout.compact_toggle {
            Some(toggle) => {
                render_compact_toggle(frame, toggle, &*app.ctx.theme, app.sidebar.compact_toggle_hovered);
                app.sidebar.compact_toggle_area = toggle;
            }
            None => app.sidebar.compact_toggle_area = Rect::default(),
        }

        match layout.drawer {
            Some(drawer) => self.sidebar_view.render(frame, drawer, app),
            None => {
                app.sidebar.last_area = Rect::default();
                app.sidebar.row_areas.clear();
            }
        }

        if app.profile_menu.is_open() {
            self.menu_view.render(frame, area, app);
        }

        if let Some((modal, position)) = self.modal_view.as_mut() {
            render_overlay(frame, app);
            let modal_area = position.0(area);
            frame.render_widget(Clear, modal_area);
            modal.render(frame, modal_area, app);
        }
    }
}

/// Dims everything below an open modal.
fn render_overlay(frame: &mut Frame, app: &mut App) {
    frame.render_widget(Block::default().style(app.ctx.theme.modal_background_style()).dim(), frame.area());
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::test_support::{buffer_text, test_app};

    fn draw(view: &mut MainView, app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        app.rebuild_focus();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, app);
            })
            .expect("draw");
        terminal
    }

    fn apply(view: &mut MainView, app: &mut App, effects: Vec<Effect>) {
        for effect in effects {
            let follow_up = view.apply_local_effect(app, effect);
            assert!(follow_up.is_empty());
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn ctrl_b_toggles_the_drawer() {
        let mut app = test_app();
        let mut view = MainView::default();
        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert_eq!(effects, vec![Effect::ToggleSidebar]);
        apply(&mut view, &mut app, effects);
        assert!(app.sidebar.is_expanded());
    }

    #[test]
    fn help_overlay_captures_input_until_closed() {
        let mut app = test_app();
        let mut view = MainView::default();
        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        apply(&mut view, &mut app, effects);
        assert_eq!(app.open_modal, Some(Modal::KeyboardShortcuts));

        let text = buffer_text(&draw(&mut view, &mut app, 100, 30));
        assert!(text.contains("Keyboard Shortcuts"));

        // shortcuts are not routed while the overlay is open
        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert!(effects.is_empty());

        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        apply(&mut view, &mut app, effects);
        assert!(app.open_modal.is_none());
        assert!(view.modal_view.is_none());
    }

    #[test]
    fn profile_row_opens_the_menu_beside_it() {
        let mut app = test_app();
        let mut view = MainView::default();
        draw(&mut view, &mut app, 100, 30);

        let profile_row = *app.sidebar.row_areas.last().expect("profile row");
        let effects = view.handle_mouse_events(&mut app, click(1, profile_row.y));
        assert!(effects.is_empty());
        assert!(app.profile_menu.is_open());

        draw(&mut view, &mut app, 100, 30);
        assert!(app.profile_menu.last_area.x >= profile_row.right());
        assert!(app.profile_menu.last_area.bottom() <= 30);

        // a click elsewhere only closes the menu
        assert!(view.handle_mouse_events(&mut app, click(1, 0)).is_empty());
        assert!(!app.profile_menu.is_open());
    }

    #[test]
    fn narrow_terminals_show_the_compact_toggle() {
        let mut app = test_app();
        let mut view = MainView::default();
        draw(&mut view, &mut app, 60, 20);
        assert!(app.sidebar.row_areas.is_empty());
        assert_eq!(app.sidebar.compact_toggle_area, Rect::new(0, 0, 6, 1));

        let effects = view.handle_mouse_events(&mut app, click(2, 0));
        assert_eq!(effects, vec![Effect::ToggleSidebar]);
        apply(&mut view, &mut app, effects);
        draw(&mut view, &mut app, 60, 20);
        assert_eq!(app.sidebar.last_area.width, 29);
    }
}
