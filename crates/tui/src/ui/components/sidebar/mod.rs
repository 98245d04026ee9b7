//! Collapsible navigation drawer.
//!
//! The drawer stacks, top to bottom: the hamburger toggle, the navigation
//! items for the selected cluster, a flexible spacer, the announcements row
//! (feature flagged), the external Docs link and the profile item. It owns
//! the expand/collapse state and issues the profile query on every mount.

mod layout;
mod sidebar_component;
mod state;

pub use layout::shell_layout;
pub use sidebar_component::SidebarComponent;
pub use state::SidebarState;
