//! Profile item: the user's avatar, name and email at the bottom of the
//! drawer, and the dropdown menu it opens.

mod menu_component;
mod profile_component;
mod state;

pub use menu_component::ProfileMenuComponent;
pub use profile_component::render_profile_row;
pub use state::ProfileMenuState;
