//! Theme styling for the console sidebar.
//!
//! This module defines the Dracula and Nord palettes, an ANSI 256-color
//! fallback, semantic theme roles and helper builders for Ratatui styles.
//! Prefer these helpers over hard-coding colors.

use std::env;

use pixie_util::is_truthy;
use tracing::debug;

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::{DraculaTheme, DraculaThemeHighContrast};
pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::Theme;

/// Environment variable naming a theme; wins over the configured preference.
pub const THEME_ENV: &str = "PIXIE_THEME";
/// Forces `truecolor` or `ansi256` output regardless of terminal detection.
pub const COLOR_MODE_ENV: &str = "PIXIE_COLOR_MODE";

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme based on the environment, the configured preference and
/// terminal capabilities.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    let capability = detect_color_capability();
    if matches!(capability, ColorCapability::Ansi256) {
        debug!("ANSI-only terminal detected; forcing fallback palette");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    if let Ok(theme_name) = env::var(THEME_ENV)
        && let Some(definition) = catalog::resolve(theme_name.trim())
    {
        return LoadedTheme::from_definition(definition);
    }

    if let Some(name) = preferred_theme
        && let Some(definition) = catalog::resolve(name.trim())
    {
        return LoadedTheme::from_definition(definition);
    }

    LoadedTheme::from_definition(catalog::default_truecolor())
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var(COLOR_MODE_ENV).ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    if env::var("PIXIE_FORCE_TRUECOLOR")
        .ok()
        .is_some_and(|value| is_truthy(value.trim()))
    {
        return ColorCapability::Truecolor;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}
