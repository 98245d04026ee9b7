use ratatui::style::Color;

use super::{Ansi256Theme, DraculaTheme, DraculaThemeHighContrast, NordTheme, NordThemeHighContrast, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used in the config file and `--theme`.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Representative accent color.
    pub accent: Color,
    /// Theme aliases that map back to this definition.
    pub aliases: &'static [&'static str],
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

const DRACULA: ThemeDefinition = ThemeDefinition {
    id: "dracula",
    label: "Dracula",
    accent: Color::Rgb(0xFF, 0x79, 0xC6),
    aliases: &["dracula"],
    factory: || Box::new(DraculaTheme::new()),
};

const ANSI256: ThemeDefinition = ThemeDefinition {
    id: "ansi256",
    label: "ANSI 256",
    accent: Color::Indexed(212),
    aliases: &["ansi256", "ansi", "256"],
    factory: || Box::new(Ansi256Theme::new()),
};

/// Ordered list of themes known to the loader.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    DRACULA,
    ThemeDefinition {
        id: "dracula_hc",
        label: "Dracula High Contrast",
        accent: Color::Rgb(0xBD, 0x93, 0xF9),
        aliases: &["dracula_hc", "dracula-high-contrast", "dracula-hc"],
        factory: || Box::new(DraculaThemeHighContrast::new()),
    },
    ThemeDefinition {
        id: "nord",
        label: "Nord",
        accent: Color::Rgb(0x88, 0xC0, 0xD0),
        aliases: &["nord"],
        factory: || Box::new(NordTheme::new()),
    },
    ThemeDefinition {
        id: "nord_hc",
        label: "Nord High Contrast",
        accent: Color::Rgb(0x5E, 0x81, 0xAC),
        aliases: &["nord_hc", "nord-high-contrast", "nord-hc"],
        factory: || Box::new(NordThemeHighContrast::new()),
    },
    ANSI256,
];

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(name) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &DRACULA
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    &ANSI256
}
