//! UI components: sidebar, profile menu, shortcuts overlay, content.

pub mod announcements;
pub mod component;
pub mod content;
pub mod hamburger;
pub mod help;
pub mod link_item;
pub mod profile;
pub mod sidebar;

pub(crate) use component::{Component, find_target_index_by_mouse_position};
pub use content::ContentComponent;
pub use help::KeyboardShortcutsComponent;
pub use profile::ProfileMenuComponent;
pub use sidebar::SidebarComponent;
