//! Toast notification overlay

use crate::app::App;
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render toast notification
pub fn render(frame: &mut Frame, app: &App) {
    if let Some(ref toast) = app.toast {
        let area = frame.area();
        let width = (area.width / 3).clamp(30, 60);

        // Calculate dynamic height based on text length + vertical padding
        let inner_width = width.saturating_sub(4) as usize;
        let text_len = toast.message.chars().count();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let text_lines = if inner_width > 0 {
            (text_len as f64 / inner_width as f64).ceil() as u16
        } else {
            1
        };

        let height = (text_lines + 2).max(5);

        // Bottom right, clear of the footer
        let toast_area = Rect {
            x: area.width.saturating_sub(width + 1),
            y: area.height.saturating_sub(height + 1),
            width: width.min(area.width),
            height: height.min(area.height),
        };

        // Clear the background
        frame.render_widget(Clear, toast_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT_PRIMARY))
            .title(Span::styled(
                " INFO ",
                Style::default()
                    .fg(theme::NORD_POLAR_NIGHT_1)
                    .bg(theme::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner_area = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let vertical_chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(text_lines),
            Constraint::Fill(1),
        ])
        .split(inner_area);

        let paragraph = Paragraph::new(toast.message.as_str())
            .wrap(ratatui::widgets::Wrap { trim: true })
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, vertical_chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_toast_fits_small_terminals() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            SettingsStore::new(dir.path().join("settings.json")),
            StdRng::seed_from_u64(0),
        );
        app.connect();
        assert!(app.toast.is_some());

        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
