mod content;
mod help_component;

pub use help_component::KeyboardShortcutsComponent;
