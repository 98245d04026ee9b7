//! Geometry of the drawer and the area it leaves for the content.

use ratatui::layout::{Constraint, Layout, Rect};

use super::state::{DrawerState, SidebarRow};

/// Drawer width while collapsed, in columns.
pub const COLLAPSED_WIDTH: u16 = 6;
/// Drawer width while expanded, in columns.
pub const EXPANDED_WIDTH: u16 = 29;
/// Terminals narrower than this use the compact layout.
pub const COMPACT_BREAKPOINT: u16 = 80;

/// Areas of the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    /// The drawer, `None` when hidden. An expanded drawer overlays `content`.
    pub drawer: Option<Rect>,
    /// Stand-alone hamburger drawn in the compact layout.
    pub compact_toggle: Option<Rect>,
    pub content: Rect,
}

/// Splits `area` between the drawer and the content.
///
/// The content always starts after the collapsed drawer so expanding never
/// reflows it. In the compact layout the collapsed drawer is hidden, a
/// hamburger takes the top-left corner, and the content starts below it.
pub fn shell_layout(area: Rect, drawer: DrawerState) -> ShellLayout {
    let drawer_width = if drawer.is_expanded() { EXPANDED_WIDTH } else { COLLAPSED_WIDTH }.min(area.width);

    if area.width < COMPACT_BREAKPOINT {
        let toggle = Rect::new(area.x, area.y, COLLAPSED_WIDTH.min(area.width), area.height.min(1));
        let content = Rect::new(area.x, area.y + toggle.height, area.width, area.height - toggle.height);
        return ShellLayout {
            drawer: drawer.is_expanded().then(|| Rect::new(area.x, area.y, drawer_width, area.height)),
            compact_toggle: Some(toggle),
            content,
        };
    }

    let content_x = area.x + COLLAPSED_WIDTH;
    ShellLayout {
        drawer: Some(Rect::new(area.x, area.y, drawer_width, area.height)),
        compact_toggle: None,
        content: Rect::new(content_x, area.y, area.width - COLLAPSED_WIDTH, area.height),
    }
}

/// Row rectangles inside the drawer, in the order of `rows`.
///
/// A flexible spacer separates the navigation rows from the bottom group
/// (announcements, docs, profile).
pub fn row_layout(area: Rect, rows: &[SidebarRow]) -> Vec<Rect> {
    let mut constraints = Vec::with_capacity(rows.len() + 1);
    let mut spacer_index = None;
    for row in rows {
        if spacer_index.is_none() && row.is_bottom_group() {
            spacer_index = Some(constraints.len());
            constraints.push(Constraint::Min(0));
        }
        constraints.push(Constraint::Length(row.height()));
    }

    let mut areas = Layout::vertical(constraints).split(area).to_vec();
    if let Some(index) = spacer_index {
        areas.remove(index);
    }
    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminals_dock_the_drawer() {
        let area = Rect::new(0, 0, 120, 40);
        let collapsed = shell_layout(area, DrawerState::Collapsed);
        assert_eq!(collapsed.drawer, Some(Rect::new(0, 0, COLLAPSED_WIDTH, 40)));
        assert_eq!(collapsed.content, Rect::new(COLLAPSED_WIDTH, 0, 120 - COLLAPSED_WIDTH, 40));
        assert!(collapsed.compact_toggle.is_none());

        let expanded = shell_layout(area, DrawerState::Expanded);
        assert_eq!(expanded.drawer, Some(Rect::new(0, 0, EXPANDED_WIDTH, 40)));
        assert_eq!(expanded.content, collapsed.content);
    }

    #[test]
    fn narrow_terminals_hide_the_collapsed_drawer() {
        let area = Rect::new(0, 0, 60, 20);
        let collapsed = shell_layout(area, DrawerState::Collapsed);
        assert!(collapsed.drawer.is_none());
        assert_eq!(collapsed.compact_toggle, Some(Rect::new(0, 0, COLLAPSED_WIDTH, 1)));
        assert_eq!(collapsed.content, Rect::new(0, 1, 60, 19));

        let expanded = shell_layout(area, DrawerState::Expanded);
        assert_eq!(expanded.drawer, Some(Rect::new(0, 0, EXPANDED_WIDTH, 20)));
    }

    #[test]
    fn bottom_group_is_pinned_to_the_bottom() {
        let rows = [
            SidebarRow::Hamburger,
            SidebarRow::Nav(0),
            SidebarRow::Nav(1),
            SidebarRow::Docs,
            SidebarRow::Profile,
        ];
        let areas = row_layout(Rect::new(0, 0, 6, 30), &rows);
        assert_eq!(areas.len(), rows.len());
        assert_eq!(areas[0], Rect::new(0, 0, 6, 2));
        assert_eq!(areas[1].y, 2);
        assert_eq!(areas[2].y, 3);
        assert_eq!(areas[3], Rect::new(0, 27, 6, 1));
        assert_eq!(areas[4], Rect::new(0, 28, 6, 2));
    }
}
