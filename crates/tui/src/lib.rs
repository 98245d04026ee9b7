//! # Pixie Console Sidebar
//!
//! This library provides the navigation sidebar of the Pixie console as a
//! terminal user interface built on Ratatui.
//!
//! ## Key Features
//!
//! - Collapsible drawer with cluster navigation, docs and announcements links
//! - Profile item backed by a fresh user info query on every mount
//! - Profile menu with admin, keyboard shortcuts and logout actions
//! - Keyboard shortcut registry and overlay
//! - Mouse and keyboard navigation with rat-focus
//!
//! ## Architecture
//!
//! Components handle input and render themselves, returning `Effect`s. The
//! runtime applies local effects to the application state and turns the rest
//! into commands (API queries, browser launches) executed on Tokio.

mod app;
mod cmd;
pub mod shortcuts;
mod ui;

use anyhow::Result;

pub use app::SidebarContext;
use shortcuts::ShortcutRegistry;

/// Runs the sidebar with the default keyboard shortcuts until the user quits
/// with `Ctrl+C`.
///
/// # Errors
///
/// Returns an error when the terminal cannot be set up, drawn to or restored.
pub async fn run(context: SidebarContext, preferred_theme: Option<String>) -> Result<()> {
    run_with_shortcuts(context, ShortcutRegistry::default(), preferred_theme).await
}

/// Like [`run`], with a caller-provided shortcut registry.
pub async fn run_with_shortcuts(context: SidebarContext, shortcuts: ShortcutRegistry, preferred_theme: Option<String>) -> Result<()> {
    ui::runtime::run_app(context, shortcuts, preferred_theme).await
}
