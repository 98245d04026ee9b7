use pixie_types::{EntityUrl, FeatureFlags, LiveViewPage, UserProfile};
use pixie_util::to_entity_pathname;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use crate::ui::components::{find_target_index_by_mouse_position, link_item::LinkItem};

pub const CLUSTER_ICON: &str = "⎈";
pub const NAMESPACES_ICON: &str = "▦";
pub const DOCS_ICON: &str = "▤";

/// Whether the drawer shows labels or icons only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawerState {
    Expanded,
    #[default]
    Collapsed,
}

impl DrawerState {
    pub fn toggled(self) -> Self {
        match self {
            DrawerState::Expanded => DrawerState::Collapsed,
            DrawerState::Collapsed => DrawerState::Expanded,
        }
    }

    pub fn is_expanded(self) -> bool {
        matches!(self, DrawerState::Expanded)
    }
}

/// A row of the drawer, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    Hamburger,
    /// Index into [`SidebarState::nav_items`].
    Nav(usize),
    Announcements,
    Docs,
    Profile,
}

impl SidebarRow {
    /// Rows pinned to the bottom of the drawer, below the spacer.
    pub fn is_bottom_group(self) -> bool {
        matches!(self, SidebarRow::Announcements | SidebarRow::Docs | SidebarRow::Profile)
    }

    pub fn height(self) -> u16 {
        match self {
            SidebarRow::Hamburger | SidebarRow::Profile => 2,
            _ => 1,
        }
    }
}

/// Navigation items for `cluster_name`: the cluster overview and its
/// namespaces.
pub fn nav_items_for(cluster_name: &str) -> Vec<LinkItem> {
    vec![
        LinkItem::internal(
            CLUSTER_ICON,
            "Cluster",
            to_entity_pathname(&EntityUrl::new(cluster_name, LiveViewPage::Cluster)),
        ),
        LinkItem::internal(
            NAMESPACES_ICON,
            "Namespaces",
            to_entity_pathname(&EntityUrl::new(cluster_name, LiveViewPage::Namespaces)),
        ),
    ]
}

fn rows_for(nav_count: usize, show_announcements: bool) -> Vec<SidebarRow> {
    let mut rows = Vec::with_capacity(nav_count + 4);
    rows.push(SidebarRow::Hamburger);
    rows.extend((0..nav_count).map(SidebarRow::Nav));
    if show_announcements {
        rows.push(SidebarRow::Announcements);
    }
    rows.push(SidebarRow::Docs);
    rows.push(SidebarRow::Profile);
    rows
}

/// State of the sidebar drawer.
///
/// Owns the expand/collapse state, the navigation items derived from the
/// selected cluster, the profile fetched on mount, and the rat-focus flags and
/// rendered areas used for keyboard and mouse interaction.
#[derive(Debug, Clone)]
pub struct SidebarState {
    pub drawer: DrawerState,
    pub cluster_name: String,
    pub nav_items: Vec<LinkItem>,
    pub docs: LinkItem,
    /// Profile from the latest mount's query; `None` until it completes or
    /// when it failed.
    pub profile: Option<UserProfile>,
    generation: u64,
    pub rows: Vec<SidebarRow>,
    pub container_focus: FocusFlag,
    pub row_focus: Vec<FocusFlag>,
    /// Row under the mouse pointer.
    pub hovered: Option<usize>,
    pub last_area: Rect,
    pub row_areas: Vec<Rect>,
    /// Area of the compact hamburger, empty when not rendered.
    pub compact_toggle_area: Rect,
    pub compact_toggle_hovered: bool,
}

impl SidebarState {
    pub fn new(cluster_name: &str, flags: FeatureFlags, docs_url: &str) -> Self {
        let nav_items = nav_items_for(cluster_name);
        let rows = rows_for(nav_items.len(), flags.announcekit);
        let row_focus = (0..rows.len())
            .map(|index| FocusFlag::named(&format!("sidebar.row.{index}")))
            .collect();
        Self {
            drawer: DrawerState::default(),
            cluster_name: cluster_name.to_string(),
            nav_items,
            docs: LinkItem::external(DOCS_ICON, "Docs", docs_url),
            profile: None,
            generation: 0,
            rows,
            container_focus: FocusFlag::named("sidebar"),
            row_focus,
            hovered: None,
            last_area: Rect::default(),
            row_areas: Vec::new(),
            compact_toggle_area: Rect::default(),
            compact_toggle_hovered: false,
        }
    }

    pub fn toggle(&mut self) {
        self.drawer = self.drawer.toggled();
    }

    pub fn is_expanded(&self) -> bool {
        self.drawer.is_expanded()
    }

    /// Identifier of the latest mount.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new mount: ephemeral UI state is reset and the returned
    /// generation tags the profile query issued for it.
    pub fn mount(&mut self) -> u64 {
        self.generation += 1;
        self.drawer = DrawerState::default();
        self.profile = None;
        self.hovered = None;
        self.compact_toggle_hovered = false;
        self.generation
    }

    /// Stores a query result if it belongs to the latest mount. Returns
    /// `false` for results of earlier mounts, which are dropped.
    pub fn apply_profile(&mut self, generation: u64, profile: Option<UserProfile>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.profile = profile;
        true
    }

    /// Regenerates the navigation items for a new cluster selection.
    pub fn set_cluster(&mut self, cluster_name: &str) {
        if self.cluster_name == cluster_name {
            return;
        }
        self.cluster_name = cluster_name.to_string();
        self.nav_items = nav_items_for(cluster_name);
    }

    /// Index of the row holding focus.
    pub fn focused_row(&self) -> Option<usize> {
        self.row_focus.iter().position(FocusFlag::get)
    }

    /// Index of the row rendered at (`x`, `y`).
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        find_target_index_by_mouse_position(&self.last_area, &self.row_areas, x, y)
    }

    /// Flag of the row after (or before) the focused one, wrapping around.
    pub fn cycle_focus(&self, forward: bool) -> Option<FocusFlag> {
        let len = self.row_focus.len();
        if len == 0 {
            return None;
        }
        let next = match self.focused_row() {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        self.row_focus.get(next).cloned()
    }
}

impl HasFocus for SidebarState {
    /// Every row is a leaf under the container flag.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for flag in &self.row_focus {
            builder.leaf_widget(flag);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
