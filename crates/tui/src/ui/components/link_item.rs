//! Clickable sidebar rows pointing at an in-app path or an external URL.

use pixie_types::{Effect, NavTarget};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::ui::utils::truncate_with_ellipsis;

/// A row made of an icon, a label and a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
    pub icon: &'static str,
    pub label: String,
    pub target: NavTarget,
}

impl LinkItem {
    /// A row navigating within the console.
    pub fn internal(icon: &'static str, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            target: NavTarget::Internal(path.into()),
        }
    }

    /// A row opening `url` in a new browser tab.
    pub fn external(icon: &'static str, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            target: NavTarget::External(url.into()),
        }
    }

    /// Effect emitted when the row is clicked. External links leave the
    /// application state untouched.
    pub fn activate(&self) -> Effect {
        match &self.target {
            NavTarget::Internal(path) => Effect::Navigate(path.clone()),
            NavTarget::External(url) => Effect::OpenExternal(url.clone()),
        }
    }

    /// Text shown when the pointer rests on the collapsed row.
    pub fn tooltip(&self) -> &str {
        &self.label
    }

    /// The row's content. Labels only show while the drawer is expanded.
    pub fn row_line(&self, expanded: bool, width: u16, style: Style) -> Line<'static> {
        row_line(self.icon, &self.label, expanded, width, style)
    }
}

/// Lays out `icon` and, when `expanded`, `label` for a row `width` columns
/// wide.
pub fn row_line(icon: &str, label: &str, expanded: bool, width: u16, style: Style) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("  {icon}"), style)];
    if expanded {
        let available = usize::from(width).saturating_sub(6);
        spans.push(Span::styled(format!("  {}", truncate_with_ellipsis(label, available)), style));
    }
    Line::from(spans).style(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_links_navigate() {
        let item = LinkItem::internal("⎈", "Cluster", "/live/clusters/foo");
        assert_eq!(item.activate(), Effect::Navigate("/live/clusters/foo".into()));
        assert_eq!(item.tooltip(), "Cluster");
    }

    #[test]
    fn external_links_open_the_browser() {
        let item = LinkItem::external("▤", "Docs", "https://docs.withpixie.ai");
        assert_eq!(item.activate(), Effect::OpenExternal("https://docs.withpixie.ai".into()));
    }

    #[test]
    fn labels_are_hidden_while_collapsed() {
        let item = LinkItem::internal("⎈", "Namespaces", "/live/clusters/foo/namespaces");
        let collapsed = item.row_line(false, 6, Style::default()).to_string();
        let expanded = item.row_line(true, 29, Style::default()).to_string();
        assert!(!collapsed.contains("Namespaces"));
        assert!(expanded.contains("Namespaces"));
    }
}
