use ratatui::layout::Rect;

use crate::ui::components::find_target_index_by_mouse_position;

pub const ADMIN_PATH: &str = "/admin";
pub const LOGOUT_PATH: &str = "/logout";

/// Entries of the profile dropdown, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMenuAction {
    Admin,
    KeyboardShortcuts,
    Logout,
}

impl ProfileMenuAction {
    pub const ALL: [ProfileMenuAction; 3] = [
        ProfileMenuAction::Admin,
        ProfileMenuAction::KeyboardShortcuts,
        ProfileMenuAction::Logout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileMenuAction::Admin => "Admin",
            ProfileMenuAction::KeyboardShortcuts => "Keyboard Shortcuts",
            ProfileMenuAction::Logout => "Logout",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ProfileMenuAction::Admin => "⚙",
            ProfileMenuAction::KeyboardShortcuts => "⌨",
            ProfileMenuAction::Logout => "⏻",
        }
    }
}

/// Open/closed state of the profile dropdown.
///
/// The menu is positioned relative to `anchor`, the screen rectangle of the
/// row that opened it. Both are cleared together on close.
#[derive(Debug, Clone, Default)]
pub struct ProfileMenuState {
    open: bool,
    anchor: Option<Rect>,
    /// Index into [`ProfileMenuAction::ALL`].
    pub highlighted: usize,
    pub last_area: Rect,
    pub item_areas: Vec<Rect>,
}

impl ProfileMenuState {
    /// Opens the menu anchored to `anchor`.
    pub fn open_at(&mut self, anchor: Rect) {
        self.open = true;
        self.anchor = Some(anchor);
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.anchor = None;
        self.last_area = Rect::default();
        self.item_areas.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    pub fn highlighted_action(&self) -> ProfileMenuAction {
        ProfileMenuAction::ALL[self.highlighted % ProfileMenuAction::ALL.len()]
    }

    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % ProfileMenuAction::ALL.len();
    }

    pub fn highlight_prev(&mut self) {
        let len = ProfileMenuAction::ALL.len();
        self.highlighted = (self.highlighted + len - 1) % len;
    }

    /// Action rendered at (`x`, `y`).
    pub fn action_at(&self, x: u16, y: u16) -> Option<ProfileMenuAction> {
        find_target_index_by_mouse_position(&self.last_area, &self.item_areas, x, y)
            .and_then(|index| ProfileMenuAction::ALL.get(index).copied())
    }

    /// Whether (`x`, `y`) falls inside the rendered menu.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        crate::ui::utils::contains(self.last_area, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_sets_anchor_and_closing_clears_it() {
        let mut state = ProfileMenuState::default();
        assert!(!state.is_open());
        assert_eq!(state.anchor(), None);

        let anchor = Rect::new(0, 38, 29, 2);
        state.open_at(anchor);
        assert!(state.is_open());
        assert_eq!(state.anchor(), Some(anchor));

        state.close();
        assert!(!state.is_open());
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn highlight_wraps_in_both_directions() {
        let mut state = ProfileMenuState::default();
        state.open_at(Rect::default());
        state.highlight_prev();
        assert_eq!(state.highlighted_action(), ProfileMenuAction::Logout);
        state.highlight_next();
        assert_eq!(state.highlighted_action(), ProfileMenuAction::Admin);
        state.highlight_next();
        assert_eq!(state.highlighted_action(), ProfileMenuAction::KeyboardShortcuts);
    }
}
