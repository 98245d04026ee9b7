//! Named keyboard shortcuts.
//!
//! The registry maps action names (`show-help`, `toggle-sidebar`, ...) to a
//! key binding, a description rendered in the shortcuts overlay, and a handler
//! returning the [`Effect`]s to run. Components invoke actions by name so the
//! profile menu's "Keyboard Shortcuts" entry and the `?` key share one handler.

use std::fmt;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexmap::IndexMap;
use pixie_types::{Effect, Modal};
use thiserror::Error;

/// Opens the keyboard shortcuts overlay. Every registry must provide it.
pub const SHOW_HELP: &str = "show-help";
pub const TOGGLE_SIDEBAR: &str = "toggle-sidebar";
pub const NEXT_CLUSTER: &str = "next-cluster";

pub type ShortcutHandler = Arc<dyn Fn() -> Vec<Effect> + Send + Sync>;

/// A single key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(character: char) -> Self {
        Self::new(KeyCode::Char(character), KeyModifiers::NONE)
    }

    pub const fn ctrl(character: char) -> Self {
        Self::new(KeyCode::Char(character), KeyModifiers::CONTROL)
    }

    /// Whether `key` triggers this binding.
    ///
    /// SHIFT is ignored for characters since the reported character already
    /// reflects it (`?` arrives as `Shift+?` on most terminals).
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let significant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if key.modifiers & significant != self.modifiers & significant {
            return false;
        }
        match (self.code, key.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) if self.modifiers.contains(KeyModifiers::CONTROL) => {
                expected.eq_ignore_ascii_case(&actual)
            }
            (expected, actual) => expected == actual,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        match self.code {
            KeyCode::Char(character) if self.modifiers.is_empty() => write!(f, "{character}"),
            KeyCode::Char(character) => write!(f, "{}", character.to_ascii_uppercase()),
            other => write!(f, "{other}"),
        }
    }
}

/// A registered action.
#[derive(Clone)]
pub struct Shortcut {
    pub name: String,
    pub binding: KeyBinding,
    pub description: String,
    handler: ShortcutHandler,
}

impl Shortcut {
    pub fn new(
        name: impl Into<String>,
        binding: KeyBinding,
        description: impl Into<String>,
        handler: impl Fn() -> Vec<Effect> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            binding,
            description: description.into(),
            handler: Arc::new(handler),
        }
    }

    /// Keys shown in the overlay, e.g. `Ctrl+B`.
    pub fn display_keys(&self) -> String {
        self.binding.to_string()
    }

    pub fn invoke(&self) -> Vec<Effect> {
        (self.handler)()
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("name", &self.name)
            .field("binding", &self.binding)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("shortcut registry is missing the required '{0}' action")]
    MissingHandler(String),
    #[error("no shortcut named '{0}'")]
    Unknown(String),
}

/// Ordered collection of shortcuts keyed by action name.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry {
    shortcuts: IndexMap<String, Shortcut>,
}

impl ShortcutRegistry {
    pub fn builder() -> ShortcutRegistryBuilder {
        ShortcutRegistryBuilder::default()
    }

    /// Runs exactly the handler registered under `name`.
    pub fn invoke(&self, name: &str) -> Result<Vec<Effect>, ShortcutError> {
        self.shortcuts
            .get(name)
            .map(Shortcut::invoke)
            .ok_or_else(|| ShortcutError::Unknown(name.to_string()))
    }

    /// The first shortcut bound to `key`, if any.
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<&Shortcut> {
        self.shortcuts.values().find(|shortcut| shortcut.binding.matches(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.shortcuts.values()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self {
            shortcuts: default_shortcuts()
                .into_iter()
                .map(|shortcut| (shortcut.name.clone(), shortcut))
                .collect(),
        }
    }
}

fn default_shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new(SHOW_HELP, KeyBinding::plain('?'), "Show keyboard shortcuts", || {
            vec![Effect::ShowModal(Modal::KeyboardShortcuts)]
        }),
        Shortcut::new(TOGGLE_SIDEBAR, KeyBinding::ctrl('b'), "Expand or collapse the sidebar", || {
            vec![Effect::ToggleSidebar]
        }),
        Shortcut::new(NEXT_CLUSTER, KeyBinding::ctrl('n'), "Switch to the next cluster", || {
            vec![Effect::SelectNextCluster]
        }),
    ]
}

/// Builds a [`ShortcutRegistry`], enforcing the required actions.
#[derive(Debug, Default)]
pub struct ShortcutRegistryBuilder {
    shortcuts: IndexMap<String, Shortcut>,
}

impl ShortcutRegistryBuilder {
    /// Starts from the built-in shortcuts.
    pub fn with_defaults(mut self) -> Self {
        for shortcut in default_shortcuts() {
            self.shortcuts.insert(shortcut.name.clone(), shortcut);
        }
        self
    }

    /// Adds `shortcut`, replacing any action with the same name.
    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.insert(shortcut.name.clone(), shortcut);
        self
    }

    pub fn build(self) -> Result<ShortcutRegistry, ShortcutError> {
        if !self.shortcuts.contains_key(SHOW_HELP) {
            return Err(ShortcutError::MissingHandler(SHOW_HELP.to_string()));
        }
        Ok(ShortcutRegistry {
            shortcuts: self.shortcuts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crossterm::event::KeyEventKind;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn registry_without_show_help_is_rejected() {
        let result = ShortcutRegistry::builder()
            .shortcut(Shortcut::new(TOGGLE_SIDEBAR, KeyBinding::ctrl('b'), "Toggle", Vec::new))
            .build();
        assert_eq!(result.err(), Some(ShortcutError::MissingHandler(SHOW_HELP.to_string())));
    }

    #[test]
    fn invoke_runs_only_the_named_handler() {
        let help_calls = Arc::new(AtomicUsize::new(0));
        let other_calls = Arc::new(AtomicUsize::new(0));
        let registry = {
            let help_calls = Arc::clone(&help_calls);
            let other_calls = Arc::clone(&other_calls);
            ShortcutRegistry::builder()
                .shortcut(Shortcut::new(SHOW_HELP, KeyBinding::plain('?'), "Help", move || {
                    help_calls.fetch_add(1, Ordering::SeqCst);
                    Vec::new()
                }))
                .shortcut(Shortcut::new(TOGGLE_SIDEBAR, KeyBinding::ctrl('b'), "Toggle", move || {
                    other_calls.fetch_add(1, Ordering::SeqCst);
                    Vec::new()
                }))
                .build()
                .expect("registry")
        };

        registry.invoke(SHOW_HELP).expect("show-help");
        registry.invoke(SHOW_HELP).expect("show-help");
        assert_eq!(help_calls.load(Ordering::SeqCst), 2);
        assert_eq!(other_calls.load(Ordering::SeqCst), 0);
        assert_eq!(registry.invoke("missing"), Err(ShortcutError::Unknown("missing".into())));
    }

    #[test]
    fn custom_shortcuts_extend_the_defaults() {
        let registry = ShortcutRegistry::builder()
            .with_defaults()
            .shortcut(Shortcut::new("open-docs", KeyBinding::ctrl('d'), "Open the docs", || {
                vec![Effect::OpenExternal("https://docs.withpixie.ai".into())]
            }))
            .shortcut(Shortcut::new(NEXT_CLUSTER, KeyBinding::ctrl('k'), "Next cluster", Vec::new))
            .build()
            .expect("registry");

        let names: Vec<&str> = registry.iter().map(|shortcut| shortcut.name.as_str()).collect();
        assert_eq!(names, vec![SHOW_HELP, TOGGLE_SIDEBAR, NEXT_CLUSTER, "open-docs"]);
        assert_eq!(registry.invoke(SHOW_HELP), Ok(vec![Effect::ShowModal(Modal::KeyboardShortcuts)]));

        // replacing an action keeps its slot but takes the new binding
        let next = registry.action_for_key(&key(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(next.map(|shortcut| shortcut.name.as_str()), Some(NEXT_CLUSTER));
        assert!(registry.action_for_key(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)).is_none());
    }

    #[test]
    fn default_bindings_match_keys() {
        let registry = ShortcutRegistry::default();
        let help = registry.action_for_key(&key(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert_eq!(help.map(|shortcut| shortcut.name.as_str()), Some(SHOW_HELP));

        let toggle = registry.action_for_key(&key(KeyCode::Char('b'), KeyModifiers::CONTROL));
        assert_eq!(toggle.map(|shortcut| shortcut.name.as_str()), Some(TOGGLE_SIDEBAR));

        assert!(registry.action_for_key(&key(KeyCode::Char('b'), KeyModifiers::NONE)).is_none());
        assert_eq!(registry.invoke(NEXT_CLUSTER), Ok(vec![Effect::SelectNextCluster]));
    }

    #[test]
    fn display_keys_are_readable() {
        assert_eq!(KeyBinding::ctrl('b').to_string(), "Ctrl+B");
        assert_eq!(KeyBinding::plain('?').to_string(), "?");
    }
}
