//! UI rendering module for the TUI application.
//!
//! This module provides the components, the main view that lays them out,
//! the runtime driving them, themes and layout utilities.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
