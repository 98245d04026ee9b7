//! Application state for the console sidebar.
//!
//! `App` owns the sidebar, the profile menu, the shortcut registry and the
//! current location. Components mutate it through their event handlers and
//! report side effects as [`Effect`]s; effects that only touch this state are
//! applied by [`App::apply_local_effect`], the rest become commands.

use std::fmt;
use std::sync::Arc;

use pixie_api::ProfileSource;
use pixie_types::{ClusterContext, Effect, FeatureFlags, Modal, Msg, User};
use pixie_util::ConsoleConfig;
use rat_focus::{Focus, FocusBuilder};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::shortcuts::ShortcutRegistry;
use crate::ui::components::profile::ProfileMenuState;
use crate::ui::components::sidebar::SidebarState;
use crate::ui::theme::{LoadedTheme, Theme, ThemeDefinition};

/// Everything the embedding console injects into the sidebar.
#[derive(Debug, Clone)]
pub struct SidebarContext {
    pub clusters: ClusterContext,
    pub user: User,
    pub flags: FeatureFlags,
    pub docs_url: String,
    pub announcekit_widget: String,
    pub profile_source: Arc<dyn ProfileSource>,
}

impl SidebarContext {
    pub fn from_config(config: &ConsoleConfig, profile_source: Arc<dyn ProfileSource>) -> Self {
        Self {
            clusters: config.cluster_context(),
            user: config.user.clone(),
            flags: config.flags,
            docs_url: config.docs_url(),
            announcekit_widget: config.announcekit_widget.clone(),
            profile_source,
        }
    }
}

/// Cross-cutting shared context owned by the App.
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub theme_definition: &'static ThemeDefinition,
    pub user: User,
    pub flags: FeatureFlags,
    pub announcekit_widget: String,
    pub profile_source: Arc<dyn ProfileSource>,
}

impl fmt::Debug for SharedCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCtx")
            .field("theme", &self.theme_definition.id)
            .field("user", &self.user)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub clusters: ClusterContext,
    pub sidebar: SidebarState,
    pub profile_menu: ProfileMenuState,
    pub shortcuts: ShortcutRegistry,
    /// Path of the page shown in the content area.
    pub location: String,
    pub open_modal: Option<Modal>,
    pub focus: Focus,
    pub screen: Rect,
}

impl App {
    pub fn new(context: SidebarContext, shortcuts: ShortcutRegistry, theme: LoadedTheme) -> Self {
        let SidebarContext {
            clusters,
            user,
            flags,
            docs_url,
            announcekit_widget,
            profile_source,
        } = context;

        let sidebar = SidebarState::new(&clusters.selected_cluster_name, flags, &docs_url);
        let location = sidebar
            .nav_items
            .first()
            .map(|item| item.target.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        let focus = FocusBuilder::build_for(&sidebar);

        Self {
            ctx: SharedCtx {
                theme: theme.theme,
                theme_definition: theme.definition,
                user,
                flags,
                announcekit_widget,
                profile_source,
            },
            clusters,
            sidebar,
            profile_menu: ProfileMenuState::default(),
            shortcuts,
            location,
            open_modal: None,
            focus,
            screen: Rect::default(),
        }
    }

    /// Rebuilds the focus tree, keeping the focused row when it still exists.
    pub fn rebuild_focus(&mut self) {
        let old_focus = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&self.sidebar, Some(old_focus));
    }

    /// Mounts the sidebar: resets its transient state and requests a fresh
    /// profile for the new mount.
    pub fn mount_sidebar(&mut self) -> Vec<Effect> {
        self.profile_menu.close();
        let generation = self.sidebar.mount();
        debug!(generation, "sidebar mounted");
        vec![Effect::FetchUserInfo { generation }]
    }

    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {}
            Msg::Resize(width, height) => {
                self.screen = Rect::new(0, 0, *width, *height);
                // the anchor row moves with the layout
                self.profile_menu.close();
                self.sidebar.hovered = None;
            }
            Msg::UserInfoLoaded { generation, profile } => {
                if !self.sidebar.apply_profile(*generation, profile.clone()) {
                    debug!(generation, current = self.sidebar.generation(), "dropping stale user info");
                }
            }
            Msg::ClusterSelected(name) => {
                self.clusters.select(name);
                self.sidebar.set_cluster(name);
                info!(cluster = %name, "cluster selected");
            }
        }
        Vec::new()
    }

    /// Applies an effect that only changes application state. Returns any
    /// follow-up effects.
    pub fn apply_local_effect(&mut self, effect: &Effect) -> Vec<Effect> {
        match effect {
            Effect::Navigate(path) => {
                info!(%path, "navigate");
                self.location = path.clone();
            }
            Effect::ToggleSidebar => {
                self.profile_menu.close();
                self.sidebar.toggle();
            }
            Effect::SelectNextCluster => {
                let name = self.clusters.select_next().to_string();
                return self.update(&Msg::ClusterSelected(name));
            }
            Effect::ShowModal(modal) => {
                self.profile_menu.close();
                self.open_modal = Some(*modal);
            }
            Effect::CloseModal => self.open_modal = None,
            Effect::OpenExternal(_) | Effect::FetchUserInfo { .. } => {
                warn!(?effect, "effect is not local; ignoring");
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pixie_api::QueryError;
    use pixie_types::{UserInfoResponse, UserProfile};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::ui::theme::catalog;

    /// Profile source answering from memory.
    #[derive(Debug, Default)]
    pub(crate) struct FakeProfileSource {
        pub profile: Option<UserProfile>,
        pub fail: bool,
        calls: AtomicUsize,
    }

    impl FakeProfileSource {
        pub(crate) fn with_profile(profile: UserProfile) -> Self {
            Self {
                profile: Some(profile),
                ..Self::default()
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileSource for FakeProfileSource {
        async fn fetch_user_info(&self) -> Result<UserInfoResponse, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(QueryError::MissingData);
            }
            Ok(UserInfoResponse {
                user: self.profile.clone(),
            })
        }
    }

    pub(crate) fn context(flags: FeatureFlags, profile_source: Arc<dyn ProfileSource>) -> SidebarContext {
        SidebarContext {
            clusters: ClusterContext::new("foo", vec!["foo".into(), "bar".into()]),
            user: User {
                email: "a@x.com".into(),
                org_name: "Acme".into(),
            },
            flags,
            docs_url: "https://docs.withpixie.ai".into(),
            announcekit_widget: "https://announcekit.app/widgets/v2/pixie".into(),
            profile_source,
        }
    }

    fn loaded_theme() -> LoadedTheme {
        let definition = catalog::default_truecolor();
        LoadedTheme {
            definition,
            theme: definition.build(),
        }
    }

    pub(crate) fn app_with(flags: FeatureFlags, shortcuts: ShortcutRegistry) -> App {
        App::new(context(flags, Arc::new(FakeProfileSource::default())), shortcuts, loaded_theme())
    }

    pub(crate) fn test_app() -> App {
        app_with(FeatureFlags::default(), ShortcutRegistry::default())
    }

    pub(crate) fn test_app_with_flags(flags: FeatureFlags) -> App {
        app_with(flags, ShortcutRegistry::default())
    }

    pub(crate) fn app_with_shortcuts(shortcuts: ShortcutRegistry) -> App {
        app_with(FeatureFlags::default(), shortcuts)
    }

    /// Rendered buffer as newline-separated rows.
    pub(crate) fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
