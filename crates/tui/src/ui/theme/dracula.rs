use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Dracula palette (https://draculatheme.com/contribute)
// Core
pub const BG: Color = Color::Rgb(0x28, 0x2A, 0x36); // #282a36 - Background
pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A); // #44475a - Current line / selection
pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2); // #f8f8f2 - Foreground text
pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4); // #6272a4 - Muted / comments

// Accents
pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD); // #8be9fd
pub const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C); // #ffb86c
pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6); // #ff79c6
pub const PURPLE: Color = Color::Rgb(0xBD, 0x93, 0xF9); // #bd93f9

pub const BG_MODAL_OVERLAY: Color = Color::Rgb(0x1D, 0x1F, 0x27); // Darkened overlay for modals
pub const BG_SIDEBAR: Color = Color::Rgb(0x21, 0x22, 0x2C); // Drawer sits a shade below the content
pub const SIDEBAR_SHADOW: Color = Color::Rgb(0x16, 0x17, 0x1E);

/// Default Dracula theme tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct DraculaTheme {
    roles: ThemeRoles,
}

impl DraculaTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BG,
                surface: BG,
                surface_muted: CURRENT_LINE,
                border: CURRENT_LINE,
                divider: CURRENT_LINE,

                text: FOREGROUND,
                text_secondary: COMMENT,
                text_muted: COMMENT,

                // Pink = interactive primary; Cyan = focus
                accent_primary: PINK,

                warning: ORANGE,

                selection_bg: CURRENT_LINE,
                selection_fg: FOREGROUND,
                focus: CYAN,
                modal_bg: BG_MODAL_OVERLAY,

                sidebar: BG_SIDEBAR,
                sidebar_shadow: SIDEBAR_SHADOW,
            },
        }
    }
}

impl Default for DraculaTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DraculaTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// High-contrast Dracula: stronger borders and selection.
#[derive(Debug, Clone)]
pub struct DraculaThemeHighContrast {
    roles: ThemeRoles,
}

impl DraculaThemeHighContrast {
    pub fn new() -> Self {
        let mut roles = DraculaTheme::new().roles;
        roles.border = PURPLE;
        roles.text_secondary = FOREGROUND;
        roles.sidebar_shadow = PURPLE;
        Self { roles }
    }
}

impl Theme for DraculaThemeHighContrast {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
