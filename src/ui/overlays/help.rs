//! Help overlay: key bindings and the glossary

use crate::app::App;
use crate::catalog::GLOSSARY;
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Key bindings as (keys, description) pairs, grouped under headers.
const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "WIZARD",
        &[
            ("←/→ h/l", "Previous / next step"),
            ("1-4", "Jump to step"),
            ("j/k", "Move field, region, or protocol"),
            ("Enter", "Edit field / cycle choice / connect"),
            ("e", "Expand protocol details"),
            ("n", "New connection"),
        ],
    ),
    (
        "TUNNEL",
        &[
            ("c", "Connect and visualize"),
            ("d", "Disconnect"),
            ("i", "Import existing config"),
            ("t", "Run troubleshooting checks"),
            ("y", "Copy config snippet"),
        ],
    ),
    (
        "DISPLAY",
        &[
            ("a", "Cycle accent colour"),
            ("+/-", "Slower / faster packet loop"),
            ("?", "Toggle help"),
            ("q", "Quit"),
        ],
    ),
];

/// Render help overlay
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(80, 80, frame.area());
    let accent = theme::accent(&app.session.selection.accent);

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(" Tunnelscope Help ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_style = Style::default().fg(accent).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme::TEXT_PRIMARY);
    let header_style = Style::default()
        .fg(theme::WARNING)
        .add_modifier(Modifier::BOLD);
    let subtle_style = Style::default().fg(theme::TEXT_SECONDARY);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled("TUNNELSCOPE", key_style),
            Span::raw(" - VPN tunnel visualizer "),
            Span::styled(format!("v{}", env!("CARGO_PKG_VERSION")), subtle_style),
        ]),
        Line::from(""),
    ];

    for (header, keys) in SECTIONS {
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(header, header_style)]));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{key:<10}"), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("GLOSSARY", header_style),
    ]));
    for entry in &GLOSSARY {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<12}", entry.term), key_style),
            Span::styled(entry.definition, desc_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        subtle_style,
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }
}
