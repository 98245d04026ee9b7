//! Shared types for the Pixie console sidebar.
//!
//! Everything that crosses a crate boundary lives here: the injected user and
//! cluster context, the profile payload returned by the GraphQL API, live view
//! page identifiers, and the `Msg` / `Effect` vocabulary exchanged between the
//! UI components and the runtime.

use serde::{Deserialize, Serialize};

pub mod live_view;
pub mod user;

pub use live_view::{EntityParams, EntityUrl, LiveViewPage};
pub use user::{ClusterContext, FeatureFlags, User, UserInfoResponse, UserProfile};

/// Destination of a sidebar row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavTarget {
    /// In-app path; navigating keeps the application state.
    Internal(String),
    /// Absolute URL opened in a new browser tab.
    External(String),
}

impl NavTarget {
    pub fn as_str(&self) -> &str {
        match self {
            NavTarget::Internal(path) => path,
            NavTarget::External(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, NavTarget::External(_))
    }
}

/// Overlays drawn on top of the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// List of the registered keyboard shortcuts.
    KeyboardShortcuts,
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Periodic UI tick
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// A profile query finished. `generation` identifies the sidebar mount that
    /// issued it; `profile` is `None` when the query failed or returned no user.
    UserInfoLoaded { generation: u64, profile: Option<UserProfile> },
    /// The cluster selection changed
    ClusterSelected(String),
}

/// Side effects requested by components.
///
/// Effects that only touch application state (navigation, modals, drawer) are
/// applied synchronously by the runtime; the rest are translated into commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Move the content view to an in-app path
    Navigate(String),
    /// Open an absolute URL with the system browser
    OpenExternal(String),
    /// Issue the profile query for the given mount generation
    FetchUserInfo { generation: u64 },
    /// Flip the drawer between expanded and collapsed
    ToggleSidebar,
    /// Select the next available cluster
    SelectNextCluster,
    /// Show an overlay
    ShowModal(Modal),
    /// Close the open overlay
    CloseModal,
}

impl Effect {
    /// Effects applied to `App` directly instead of being turned into commands.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Effect::Navigate(_) | Effect::ToggleSidebar | Effect::SelectNextCluster | Effect::ShowModal(_) | Effect::CloseModal
        )
    }
}

/// Result of a command executed outside the pure state update.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    /// A message to feed back into the update loop
    Message(Msg),
    /// Nothing to feed back; the string is logged
    Log(String),
}
