//! Network map: device → gateway → internet, drawn on a canvas.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::theme;

const X_BOUNDS: [f64; 2] = [0.0, 100.0];
const Y_BOUNDS: [f64; 2] = [0.0, 50.0];

const DEVICE: (f64, f64) = (10.0, 25.0);
const GATEWAY: (f64, f64) = (50.0, 25.0);
const INTERNET_A: (f64, f64) = (88.0, 40.0);
const INTERNET_B: (f64, f64) = (88.0, 10.0);

/// Links drawn as arcs, in travel order.
const LINKS: [((f64, f64), (f64, f64)); 3] = [
    (DEVICE, GATEWAY),
    (GATEWAY, INTERNET_A),
    (GATEWAY, INTERNET_B),
];

/// Packets in flight per link.
const PACKETS_PER_LINK: usize = 2;

fn lerp(from: (f64, f64), to: (f64, f64), t: f64) -> (f64, f64) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

/// Packet coordinates for a loop position `phase` in `[0, 1)`.
pub fn packet_positions(phase: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(LINKS.len() * PACKETS_PER_LINK);
    for (from, to) in LINKS {
        for i in 0..PACKETS_PER_LINK {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64 / PACKETS_PER_LINK as f64;
            points.push(lerp(from, to, (phase + offset).fract()));
        }
    }
    points
}

/// Render the map panel with its legend.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let selection = &app.session.selection;
    let target = selection.deployment_target;
    let link_color = theme::accent(target.map_color().unwrap_or(&selection.accent));
    let connected = selection.connected;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(format!(" Network Map · {} ", target.name()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);

    let region = selection.region();
    let node_color = if connected { link_color } else { theme::INACTIVE };
    let packets = if connected {
        packet_positions(app.map_phase)
    } else {
        Vec::new()
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(X_BOUNDS)
        .y_bounds(Y_BOUNDS)
        .paint(|ctx| {
            for (from, to) in LINKS {
                ctx.draw(&CanvasLine {
                    x1: from.0,
                    y1: from.1,
                    x2: to.0,
                    y2: to.1,
                    color: link_color,
                });
            }
            for (x, y) in [DEVICE, GATEWAY, INTERNET_A, INTERNET_B] {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: 2.5,
                    color: node_color,
                });
            }
            ctx.layer();
            ctx.draw(&Points {
                coords: &packets,
                color: theme::TEXT_PRIMARY,
            });

            let label = Style::default().fg(theme::TEXT_SECONDARY);
            ctx.print(DEVICE.0 - 6.0, DEVICE.1 - 8.0, Span::styled("Your device", label));
            ctx.print(
                GATEWAY.0 - 8.0,
                GATEWAY.1 - 8.0,
                Span::styled(format!("{} gateway", region.name), label),
            );
            ctx.print(INTERNET_A.0 - 8.0, INTERNET_A.1 + 5.0, Span::styled("Internet", label));
            ctx.print(INTERNET_B.0 - 8.0, INTERNET_B.1 - 7.0, Span::styled("Internet", label));
        });

    frame.render_widget(canvas, chunks[0]);

    let legend = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(link_color)),
        Span::styled(
            if connected { "Tunnel up" } else { "Tunnel idle" },
            Style::default().fg(theme::TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(theme::NORD_POLAR_NIGHT_4)),
        Span::raw("Gateway RTT: "),
        Span::styled(format!("{}ms", region.latency), Style::default().fg(theme::TEXT_PRIMARY)),
        Span::styled(" │ ", Style::default().fg(theme::NORD_POLAR_NIGHT_4)),
        Span::raw("Protocol: "),
        Span::styled(selection.protocol().name, Style::default().fg(theme::NORD_GREEN)),
        Span::styled(" │ ", Style::default().fg(theme::NORD_POLAR_NIGHT_4)),
        Span::styled(
            format!("loop {:.1}s", selection.animation_speed),
            Style::default().fg(theme::TEXT_SECONDARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(point: (f64, f64)) -> bool {
        (X_BOUNDS[0]..=X_BOUNDS[1]).contains(&point.0) && (Y_BOUNDS[0]..=Y_BOUNDS[1]).contains(&point.1)
    }

    #[test]
    fn test_packets_start_at_link_origins() {
        let points = packet_positions(0.0);
        assert_eq!(points.len(), LINKS.len() * PACKETS_PER_LINK);
        assert_eq!(points[0], DEVICE);
        assert_eq!(points[2], GATEWAY);
        assert_eq!(points[4], GATEWAY);
    }

    #[test]
    fn test_packets_stay_on_canvas() {
        for step in 0..20 {
            let phase = f64::from(step) / 20.0;
            assert!(packet_positions(phase).into_iter().all(within));
        }
    }

    #[test]
    fn test_lerp_midpoint() {
        assert_eq!(lerp(DEVICE, GATEWAY, 0.5), (30.0, 25.0));
    }
}
