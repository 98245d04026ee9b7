//! Helpers shared by the Pixie console crates: configuration loading and
//! live view path building.

pub mod config;
pub mod entity_path;
pub mod path_processing;

pub use config::{ConfigError, ConfigOverrides, ConsoleConfig};
pub use entity_path::{encode_uri_component, to_entity_pathname};
pub use path_processing::{expand_tilde, is_truthy};
