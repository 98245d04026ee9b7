//! The profile row at the bottom of the drawer.

use pixie_types::UserProfile;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{theme::Theme, utils::truncate_with_ellipsis};

/// Name, email and picture of the profile, empty when the query produced no
/// user.
pub fn profile_fields(profile: Option<&UserProfile>) -> (&str, &str, &str) {
    profile.map_or(("", "", ""), |profile| (profile.name(), profile.email(), profile.picture()))
}

/// Single-letter avatar for `name`, blank when the name is empty.
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .find(|character| !character.is_whitespace())
        .map(|character| character.to_uppercase().collect())
        .unwrap_or_else(|| " ".to_string())
}

pub fn avatar_span(theme: &dyn Theme, name: &str) -> Span<'static> {
    let roles = theme.roles();
    Span::styled(
        format!(" {} ", avatar_initial(name)),
        Style::default()
            .bg(roles.accent_primary)
            .fg(roles.background)
            .add_modifier(Modifier::BOLD),
    )
}

/// Draws the avatar, and while expanded the name over the email.
pub fn render_profile_row(frame: &mut Frame, area: Rect, theme: &dyn Theme, profile: Option<&UserProfile>, expanded: bool, style: Style) {
    let (name, email, _) = profile_fields(profile);
    let text_width = usize::from(area.width).saturating_sub(7);

    let mut first = vec![Span::styled(" ", style), avatar_span(theme, name)];
    let mut second = vec![Span::styled("     ", style)];
    if expanded {
        first.push(Span::styled(format!(" {}", truncate_with_ellipsis(name, text_width)), style.fg(theme.roles().text)));
        second.push(Span::styled(
            format!(" {}", truncate_with_ellipsis(email, text_width)),
            style.fg(theme.roles().text_muted),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(first), Line::from(second)]).style(style);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_uses_first_letter() {
        assert_eq!(avatar_initial("alice"), "A");
        assert_eq!(avatar_initial("  Bob"), "B");
        assert_eq!(avatar_initial(""), " ");
    }

    #[test]
    fn missing_profile_reads_as_blank() {
        assert_eq!(profile_fields(None), ("", "", ""));
        let profile = UserProfile {
            name: Some("A".into()),
            email: Some("b@x.com".into()),
            picture: Some("p".into()),
        };
        assert_eq!(profile_fields(Some(&profile)), ("A", "b@x.com", "p"));
    }
}
