use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use pixie_types::Effect;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::layout::row_layout;
use super::state::{SidebarRow, SidebarState};
use crate::app::App;
use crate::ui::{
    components::{
        Component,
        announcements::{ANNOUNCEMENTS_LABEL, AnnounceKitConfig, announcements_line},
        hamburger::hamburger_line,
        profile::render_profile_row,
    },
    theme::theme_helpers as th,
    utils::contains,
};

/// The navigation drawer.
///
/// Rows are activated with a left click or with `Enter` while focused.
/// Internal links navigate, external links and the announcements row open the
/// browser, the hamburger toggles the drawer and the profile row opens the
/// profile menu anchored to itself.
#[derive(Debug, Default)]
pub struct SidebarComponent;

impl SidebarComponent {
    /// Effects of clicking row `index`.
    pub fn activate_row(&self, app: &mut App, index: usize) -> Vec<Effect> {
        let Some(row) = app.sidebar.rows.get(index).copied() else {
            return Vec::new();
        };
        match row {
            SidebarRow::Hamburger => vec![Effect::ToggleSidebar],
            SidebarRow::Nav(nav_index) => app
                .sidebar
                .nav_items
                .get(nav_index)
                .map(|item| vec![item.activate()])
                .unwrap_or_default(),
            SidebarRow::Announcements => AnnounceKitConfig::for_user(app.ctx.flags, &app.ctx.announcekit_widget, &app.ctx.user)
                .map(|config| vec![config.activate()])
                .unwrap_or_default(),
            SidebarRow::Docs => vec![app.sidebar.docs.activate()],
            SidebarRow::Profile => {
                let anchor = app.sidebar.row_areas.get(index).copied().unwrap_or_default();
                app.profile_menu.open_at(anchor);
                Vec::new()
            }
        }
    }

    /// Label shown next to the collapsed drawer for row `index`. An expanded
    /// drawer already prints every label in its rows, so no tooltip is drawn.
    fn tooltip(state: &SidebarState, index: usize) -> Option<&str> {
        match state.rows.get(index)? {
            SidebarRow::Nav(nav_index) => state.nav_items.get(*nav_index).map(|item| item.tooltip()),
            SidebarRow::Announcements => Some(ANNOUNCEMENTS_LABEL),
            SidebarRow::Docs => Some(state.docs.tooltip()),
            SidebarRow::Hamburger | SidebarRow::Profile => None,
        }
    }

    fn render_tooltip(frame: &mut Frame, drawer: Rect, app: &App) {
        if app.sidebar.is_expanded() {
            return;
        }
        let Some(index) = app.sidebar.hovered else {
            return;
        };
        let (Some(label), Some(row)) = (Self::tooltip(&app.sidebar, index), app.sidebar.row_areas.get(index)) else {
            return;
        };

        let bounds = frame.area();
        let width = u16::try_from(label.width() + 2).unwrap_or(u16::MAX);
        let x = drawer.right();
        if x >= bounds.right() {
            return;
        }
        let area = Rect::new(x, row.y, width.min(bounds.right() - x), 1);
        frame.render_widget(Paragraph::new(format!(" {label} ")).style(th::tooltip_style(&*app.ctx.theme)), area);
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            KeyCode::Down => {
                if let Some(flag) = app.sidebar.cycle_focus(true) {
                    app.focus.by_widget_id(flag.widget_id());
                }
            }
            KeyCode::Up => {
                if let Some(flag) = app.sidebar.cycle_focus(false) {
                    app.focus.by_widget_id(flag.widget_id());
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = app.sidebar.focused_row() {
                    return self.activate_row(app, index);
                }
            }
            KeyCode::Esc if app.sidebar.is_expanded() => return vec![Effect::ToggleSidebar],
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                app.sidebar.hovered = app.sidebar.row_at(x, y);
                app.sidebar.compact_toggle_hovered = contains(app.sidebar.compact_toggle_area, x, y);
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(app.sidebar.compact_toggle_area, x, y) {
                    return vec![Effect::ToggleSidebar];
                }
                let Some(index) = app.sidebar.row_at(x, y) else {
                    return Vec::new();
                };
                if let Some(flag) = app.sidebar.row_focus.get(index) {
                    app.focus.focus(flag);
                }
                self.activate_row(app, index)
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &app.sidebar;
        let expanded = state.is_expanded();

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(th::sidebar_shadow_style(theme))
            .style(th::sidebar_style(theme));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let row_areas = row_layout(inner, &state.rows);
        for (index, row) in state.rows.iter().enumerate() {
            let Some(area) = row_areas.get(index).copied() else {
                break;
            };
            let focused = state.row_focus.get(index).is_some_and(|flag| flag.get());
            let hovered = state.hovered == Some(index);
            let style = th::sidebar_item_style(theme, focused, hovered);
            let line_area = Rect { height: 1, ..area };

            match row {
                SidebarRow::Hamburger => {
                    frame.render_widget(Paragraph::new(hamburger_line(theme, expanded, style)).style(style), line_area);
                }
                SidebarRow::Nav(nav_index) => {
                    if let Some(item) = state.nav_items.get(*nav_index) {
                        frame.render_widget(Paragraph::new(item.row_line(expanded, area.width, style)).style(style), line_area);
                    }
                }
                SidebarRow::Announcements => {
                    let badge = style.fg(theme.roles().warning);
                    frame.render_widget(Paragraph::new(announcements_line(expanded, style, badge)).style(style), line_area);
                }
                SidebarRow::Docs => {
                    frame.render_widget(Paragraph::new(state.docs.row_line(expanded, area.width, style)).style(style), line_area);
                }
                SidebarRow::Profile => render_profile_row(frame, area, theme, state.profile.as_ref(), expanded, style),
            }
        }

        app.sidebar.last_area = rect;
        app.sidebar.row_areas = row_areas;
        Self::render_tooltip(frame, rect, app);
    }
}
