//! Footer widget with keybinding hints

use crate::app::{App, InputMode};
use crate::theme;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hints for the current mode and wizard step.
fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if matches!(app.input_mode, InputMode::Editing { .. }) {
        return vec![("Enter", "Save"), ("Esc", "Cancel"), ("Bksp", "Delete")];
    }

    let step_hint = match app.session.selection.step {
        0 => ("j/k Enter", "Edit"),
        1 => ("j/k", "Region"),
        2 => ("j/k", "Protocol"),
        _ => ("Enter", "Connect"),
    };

    let mut hints = vec![
        ("←/→", "Step"),
        step_hint,
        ("c", "Connect"),
        ("d", "Disconnect"),
        ("i", "Import"),
        ("t", "Checks"),
        ("y", "Copy"),
        ("?", "Help"),
        ("q", "Quit"),
    ];

    if app.session.selection.connected {
        hints[2] = ("c", "Reconnect");
    }
    hints
}

/// Render dashboard footer
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    render_hints(frame, area, &hints(app));
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    spans.push(Span::raw(" "));

    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled("[", Style::default().fg(theme::NORD_POLAR_NIGHT_4)));
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("]", Style::default().fg(theme::NORD_POLAR_NIGHT_4)));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*action, Style::default().fg(theme::TEXT_SECONDARY)));
    }

    let line = Line::from(spans);
    let area_width = area.width as usize;
    let line_width = line.width();

    frame.render_widget(Paragraph::new(line), area);

    // Subtle version at the end
    let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
    if area_width > line_width + version.len() + 2 {
        #[allow(clippy::cast_possible_truncation)]
        let version_area = Rect::new(
            area.x + area.width - version.len() as u16,
            area.y,
            version.len() as u16,
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                version,
                Style::default().fg(theme::NORD_POLAR_NIGHT_4),
            )),
            version_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TextField;
    use crate::settings::SettingsStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hints_follow_mode_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            SettingsStore::new(dir.path().join("settings.json")),
            StdRng::seed_from_u64(0),
        );
        assert!(hints(&app).contains(&("c", "Connect")));

        app.connect();
        assert!(hints(&app).contains(&("c", "Reconnect")));
        assert!(hints(&app).contains(&("Enter", "Connect")));

        app.input_mode = InputMode::Editing {
            field: TextField::Username,
            buffer: String::new(),
        };
        assert_eq!(hints(&app)[0], ("Enter", "Save"));
    }
}
