//! Component system for the console UI.
//!
//! Components are self-contained UI elements that handle their own events
//! and render themselves, reporting side effects back to the runtime as
//! [`Effect`]s instead of performing them.
//!
//! # Component Lifecycle
//!
//! 1. **Messages**: `handle_message()` receives application messages
//! 2. **Input**: `handle_key_events()` and `handle_mouse_events()` receive input
//!    routed by the main view
//! 3. **Rendering**: `render()` draws the component into the provided area and
//!    records any areas needed for hit testing

use crossterm::event::{KeyEvent, MouseEvent};
use pixie_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::App;
use crate::ui::utils::contains;

pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events while this component is the input target.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events while this component is the input target.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should only draw and record layout; state changes
    /// belong in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}

/// Index of the area in `areas` containing (`x`, `y`), provided the point is
/// inside `container` at all.
pub(crate) fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    if !contains(*container, x, y) {
        return None;
    }
    areas.iter().position(|area| contains(*area, x, y))
}
