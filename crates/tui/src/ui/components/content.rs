//! The page area to the right of the drawer.
//!
//! The console pages themselves live elsewhere; this view reports where the
//! sidebar navigated to, which cluster is selected, and the key hints.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::{components::Component, theme::theme_helpers as th};

#[derive(Debug, Default)]
pub struct ContentComponent;

impl ContentComponent {
    fn hint_spans(app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        let mut spans = vec![Span::styled("Hints: ", theme.text_muted_style())];
        for shortcut in app.shortcuts.iter() {
            spans.push(Span::styled(format!(" {}", shortcut.display_keys()), th::key_hint_style(theme)));
            spans.push(Span::styled(format!(" {} ", shortcut.description), theme.text_muted_style()));
        }
        spans.push(Span::styled(" Ctrl+C", th::key_hint_style(theme)));
        spans.push(Span::styled(" Quit ", theme.text_muted_style()));
        spans
    }
}

impl Component for ContentComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let [body, hints] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(rect);

        let block = th::block(theme, Some(app.location.as_str()), false);
        let inner = block.inner(body);
        frame.render_widget(block, body);

        let label = theme.text_secondary_style().add_modifier(Modifier::BOLD);
        let definition = app.ctx.theme_definition;
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Cluster   ", label),
                Span::styled(app.clusters.selected_cluster_name.clone(), theme.text_primary_style()),
            ]),
            Line::from(vec![
                Span::styled("  Location  ", label),
                Span::styled(app.location.clone(), theme.text_primary_style()),
            ]),
            Line::from(vec![
                Span::styled("  Theme     ", label),
                Span::styled(definition.label, Style::default().fg(definition.accent)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).style(th::panel_style(theme)), inner);

        let hint_line = Line::from(Self::hint_spans(app));
        frame.render_widget(Paragraph::new(hint_line).style(app.ctx.theme.text_muted_style()), hints);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::test_support::{buffer_text, test_app};

    #[test]
    fn shows_location_cluster_and_hints() {
        let mut app = test_app();
        app.location = "/live/clusters/foo/namespaces".to_string();
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                ContentComponent.render(frame, area, &mut app);
            })
            .expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("Cluster   foo"), "{text}");
        assert!(text.contains("/live/clusters/foo/namespaces"));
        assert!(text.contains("Ctrl+B"));
        assert!(text.contains("Dracula"));
    }
}
