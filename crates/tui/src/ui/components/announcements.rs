//! Announcements row, shown only when the `announcekit` flag is on.

use pixie_types::{Effect, FeatureFlags, User};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use tracing::warn;
use url::Url;

pub const ANNOUNCEMENTS_LABEL: &str = "Announcements";
pub const ANNOUNCEMENTS_ICON: &str = "⍾";

/// Identity attached to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceKitUser {
    pub id: String,
    pub email: String,
}

/// Extra segmentation data attached to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceKitData {
    pub org: String,
}

/// Configuration of the announcements widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceKitConfig {
    pub widget: String,
    pub user: AnnounceKitUser,
    pub data: AnnounceKitData,
}

impl AnnounceKitConfig {
    /// The widget configuration for `user`, or `None` when the flag is off.
    pub fn for_user(flags: FeatureFlags, widget: &str, user: &User) -> Option<Self> {
        flags.announcekit.then(|| Self {
            widget: widget.to_string(),
            user: AnnounceKitUser {
                id: user.email.clone(),
                email: user.email.clone(),
            },
            data: AnnounceKitData {
                org: user.org_name.clone(),
            },
        })
    }

    /// Widget URL carrying the user identity as query parameters. Falls back
    /// to the bare widget string when it does not parse as a URL.
    pub fn launch_url(&self) -> String {
        match Url::parse(&self.widget) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("user[id]", &self.user.id)
                    .append_pair("user[email]", &self.user.email)
                    .append_pair("data[org]", &self.data.org);
                url.into()
            }
            Err(error) => {
                warn!(widget = %self.widget, %error, "announcements widget is not a valid URL");
                self.widget.clone()
            }
        }
    }

    pub fn activate(&self) -> Effect {
        Effect::OpenExternal(self.launch_url())
    }
}

/// Bell icon with a badge, followed by the label while expanded.
pub fn announcements_line(expanded: bool, style: Style, badge_style: Style) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("  {ANNOUNCEMENTS_ICON}"), style),
        Span::styled("•", badge_style),
    ];
    if expanded {
        spans.push(Span::styled(format!(" {ANNOUNCEMENTS_LABEL}"), style));
    }
    Line::from(spans).style(style)
}
