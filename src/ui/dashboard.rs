use crate::app::{App, IdentityRow, InputMode};
use crate::catalog::{self, PROTOCOLS, REGIONS, WIZARD_STEPS};
use crate::constants::{MSG_NO_DIAGNOSTICS, MSG_SUBTITLE_DEFAULT, MSG_SUBTITLE_IMPORTED};
use crate::presets;
use crate::session::{SelectionState, TextField};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::widgets;
use crate::theme;

/// Below this width the map and metrics stack under the wizard.
const NARROW_WIDTH: u16 = 110;

/// Render the dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // 1. Header (status row + subtitle)
    // 2. Main Content (Flexible)
    // 3. Command Footer (1 row)
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_cockpit_header(frame, app, chunks[0]);
    widgets::footer::render_dashboard(frame, app, chunks[2]);

    let narrow = app.terminal_size.0 < NARROW_WIDTH;
    let main_layout = if narrow {
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(chunks[1])
    } else {
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1])
    };

    // Left: Wizard (Top) | Diagnostics (Bottom)
    let left = Layout::vertical([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_layout[0]);
    render_wizard(frame, app, left[0]);
    render_diagnostics(frame, app, left[1]);

    // Right: Map (Top) | Metrics + Config (Bottom)
    let right = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[1]);
    widgets::network_map::render(frame, app, right[0]);

    let bottom = Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).split(right[1]);
    render_metrics(frame, app, bottom[0]);
    render_config_preview(frame, app, bottom[1]);
}

fn separator() -> Span<'static> {
    Span::styled(" │ ", Style::default().fg(theme::NORD_POLAR_NIGHT_4))
}

fn render_cockpit_header(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let selection = &session.selection;
    let accent = theme::accent(&selection.accent);

    let (status_text, color) = if selection.connected {
        ("● CONNECTED", theme::SUCCESS)
    } else {
        ("○ READY", theme::WARNING)
    };

    let uptime = session.connected_since.map_or_else(
        || "00:00:00".to_string(),
        |since| crate::utils::format_duration(since.elapsed()),
    );

    let status = Line::from(vec![
        Span::styled(
            format!(" TUNNELSCOPE v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::raw("Status: "),
        Span::styled(
            status_text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " ({})",
            crate::utils::truncate(&selection.connection_name, 24)
        )),
        separator(),
        Span::raw("Protocol: "),
        Span::styled(selection.protocol().name, Style::default().fg(theme::NORD_GREEN)),
        separator(),
        Span::raw("Region: "),
        Span::styled(selection.region().name, Style::default().fg(theme::TEXT_PRIMARY)),
        separator(),
        Span::raw("Target: "),
        Span::styled(
            selection.deployment_target.name(),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        separator(),
        Span::raw("Uptime: "),
        Span::styled(uptime, Style::default().fg(theme::ACCENT_SECONDARY)),
    ]);

    let subtitle = if session.imported_config {
        MSG_SUBTITLE_IMPORTED
    } else {
        MSG_SUBTITLE_DEFAULT
    };

    let lines = vec![
        status,
        Line::from(Span::styled(
            format!(" {subtitle}"),
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

// === Wizard ===

fn render_wizard(frame: &mut Frame, app: &App, area: Rect) {
    let step = app.session.selection.step;
    let accent = theme::accent(&app.session.selection.accent);
    let current = &WIZARD_STEPS[step.min(catalog::LAST_STEP)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(format!(
            " Step {}/{} · {} ",
            step + 1,
            WIZARD_STEPS.len(),
            current.title
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .split(inner);

    // Step tabs
    let mut tabs = Vec::new();
    for (i, s) in WIZARD_STEPS.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::styled(" → ", Style::default().fg(theme::NORD_POLAR_NIGHT_4)));
        }
        let style = if i == step {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else if i < step {
            Style::default().fg(theme::TEXT_PRIMARY)
        } else {
            Style::default().fg(theme::INACTIVE)
        };
        tabs.push(Span::styled(format!("{} {}", i + 1, s.title), style));
    }
    frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            current.detail,
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
        chunks[1],
    );

    match step {
        0 => render_identity_step(frame, app, chunks[2]),
        1 => render_region_step(frame, app, chunks[2]),
        2 => render_protocol_step(frame, app, chunks[2]),
        _ => render_review_step(frame, app, chunks[2]),
    }
}

fn field_label(app: &App, field: TextField) -> &'static str {
    match field {
        TextField::ConnectionName => "Connection",
        TextField::Username => app.session.selection.auth_method.identity_label(),
        TextField::VpcId => "VPC",
        TextField::Subnet => "Subnet",
        TextField::SecurityGroup => "Security group",
        TextField::Cidr => "CIDR",
    }
}

fn render_identity_step(frame: &mut Frame, app: &App, area: Rect) {
    let selection = &app.session.selection;
    let target = selection.deployment_target;
    let rows = IdentityRow::rows(target);
    let cursor = app.identity_cursor.min(rows.len().saturating_sub(1));

    let mut lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (label, value, editing) = match row {
                IdentityRow::Text(field) => match &app.input_mode {
                    InputMode::Editing { field: f, buffer } if f == field => {
                        (field_label(app, *field), buffer.clone(), true)
                    }
                    _ => (
                        field_label(app, *field),
                        app.session.text_field(*field).to_string(),
                        false,
                    ),
                },
                IdentityRow::Target => ("Deploy to", format!("‹ {} ›", target.name()), false),
                IdentityRow::Auth => {
                    ("Sign-in", format!("‹ {} ›", selection.auth_method), false)
                }
            };

            let selected = i == cursor;
            let marker = if selected { "▶ " } else { "  " };
            let value_style = if selected {
                Style::default()
                    .fg(theme::ROW_SELECTED_FG)
                    .bg(theme::ROW_SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_PRIMARY)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme::ACCENT_PRIMARY)),
                Span::styled(format!("{label:<15}"), Style::default().fg(theme::TEXT_SECONDARY)),
                Span::styled(value, value_style),
            ];
            if editing {
                spans.push(Span::styled(
                    "█",
                    Style::default()
                        .fg(theme::ACCENT_PRIMARY)
                        .add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let info = target.info();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", info.summary),
        Style::default().fg(theme::TEXT_PRIMARY),
    )));
    lines.push(Line::from(Span::styled(
        format!("  {}", info.notes),
        Style::default().fg(theme::TEXT_SECONDARY),
    )));

    if let Some(bundle) = presets::resolve_defaults(target, selection.region().aws_region) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Preset defaults",
            Style::default().fg(theme::WARNING).add_modifier(Modifier::BOLD),
        )));
        for (label, value) in bundle.details() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<15}"), Style::default().fg(theme::TEXT_SECONDARY)),
                Span::styled(value, Style::default().fg(theme::TEXT_PRIMARY)),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_region_step(frame: &mut Frame, app: &App, area: Rect) {
    let selected = catalog::region_index(&app.session.selection.region_id);

    let header = Row::new(["", "Region", "Country", "Latency", "Load", "Distance", "AWS"])
        .style(Style::default().fg(theme::TEXT_SECONDARY).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = REGIONS
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let is_selected = selected == Some(i);
            let style = if is_selected {
                Style::default()
                    .bg(theme::ROW_SELECTED_BG)
                    .fg(theme::ROW_SELECTED_FG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::INACTIVE)
            };
            Row::new(vec![
                Cell::from(if is_selected { "●" } else { " " }),
                Cell::from(r.name),
                Cell::from(r.country),
                Cell::from(format!("{}ms", r.latency)),
                Cell::from(r.load_percent()),
                Cell::from(r.distance_sense()),
                Cell::from(r.aws_region),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Min(0),
        ],
    )
    .header(header);

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_protocol_step(frame: &mut Frame, app: &App, area: Rect) {
    let selected = catalog::protocol_index(&app.session.selection.protocol_id);
    let mut lines = Vec::new();

    for (i, p) in PROTOCOLS.iter().enumerate() {
        let is_selected = selected == Some(i);
        let name_style = if is_selected {
            Style::default()
                .fg(theme::ROW_SELECTED_FG)
                .bg(theme::ROW_SELECTED_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_PRIMARY)
        };

        lines.push(Line::from(vec![
            Span::styled(
                if is_selected { "● " } else { "  " },
                Style::default().fg(theme::SUCCESS),
            ),
            Span::styled(p.name, name_style),
            Span::styled(format!("  {}", p.summary), Style::default().fg(theme::TEXT_SECONDARY)),
        ]));

        if is_selected {
            let detail = Style::default().fg(theme::TEXT_PRIMARY);
            let key = Style::default().fg(theme::TEXT_SECONDARY);
            lines.push(Line::from(vec![
                Span::styled("    Speed ", key),
                Span::styled(p.speed, detail),
                Span::styled("  Security ", key),
                Span::styled(p.security, detail),
                Span::styled("  Ports ", key),
                Span::styled(p.ports, detail),
            ]));
            lines.push(Line::from(vec![
                Span::styled("    Best for ", key),
                Span::styled(p.best_for, detail),
                Span::styled("  Works on ", key),
                Span::styled(p.compatibility, detail),
            ]));
            if app.protocols_expanded {
                lines.push(Line::from(Span::styled(
                    format!("    {}", p.description),
                    Style::default().fg(theme::TEXT_SECONDARY),
                )));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_review_step(frame: &mut Frame, app: &App, area: Rect) {
    let selection = &app.session.selection;
    let key = Style::default().fg(theme::TEXT_SECONDARY);
    let value = Style::default().fg(theme::TEXT_PRIMARY);
    let region = selection.region();

    let pair = |label: &'static str, v: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<15}"), key),
            Span::styled(v, value),
        ])
    };

    let mut lines = vec![
        pair("Connection", selection.connection_name.clone()),
        pair("Deploy to", selection.deployment_target.name().to_string()),
        pair(
            "Region",
            format!("{} ({}, {}ms)", region.name, region.country, region.latency),
        ),
        pair("Protocol", selection.protocol().name.to_string()),
        pair(
            "Sign-in",
            format!(
                "{} · {}",
                selection.auth_method,
                crate::utils::truncate(&selection.username, 24)
            ),
        ),
    ];

    if selection.deployment_target.is_managed() {
        let aws = &selection.aws;
        lines.push(pair("VPC / Subnet", format!("{} / {}", aws.vpc_id, aws.subnet)));
        lines.push(pair("SG / CIDR", format!("{} / {}", aws.security_group, aws.cidr)));
    }

    lines.push(Line::from(""));
    lines.push(if selection.connected {
        Line::from(Span::styled(
            "  Tunnel is up. Press d to disconnect or t to run checks.",
            Style::default().fg(theme::SUCCESS),
        ))
    } else {
        Line::from(Span::styled(
            "  Press Enter or c to connect and visualize the route.",
            Style::default()
                .fg(theme::accent(&selection.accent))
                .add_modifier(Modifier::BOLD),
        ))
    });

    frame.render_widget(Paragraph::new(lines), area);
}

// === Panels ===

fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let selection = &session.selection;
    let metrics = session.metrics;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Telemetry ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(theme::TEXT_SECONDARY);
    let value = Style::default()
        .fg(theme::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD);

    let (live_text, live_color) = if selection.connected {
        ("● Live", theme::SUCCESS)
    } else {
        ("○ Idle", theme::INACTIVE)
    };

    let text = vec![
        Line::from(vec![
            Span::styled(" Latency     ", label),
            Span::styled(format!("{:.0} ms", metrics.latency), value),
        ]),
        Line::from(vec![
            Span::styled(" Throughput  ", label),
            Span::styled(format!("{:.0} Mbps", metrics.throughput), value),
        ]),
        Line::from(vec![
            Span::styled(" Loss        ", label),
            Span::styled(format!("{:.2} %", metrics.loss), loss_style(metrics.loss)),
        ]),
        Line::from(vec![
            Span::styled(" Protocol    ", label),
            Span::styled(selection.protocol().name, Style::default().fg(theme::NORD_GREEN)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {live_text}"),
            Style::default().fg(live_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", selection.deployment_target.telemetry_source()),
            label,
        )),
    ];

    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

fn loss_style(loss: f64) -> Style {
    let color = if loss >= 1.0 {
        theme::ERROR
    } else if loss >= 0.5 {
        theme::WARNING
    } else {
        theme::TEXT_PRIMARY
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn render_config_preview(frame: &mut Frame, app: &App, area: Rect) {
    let label = app.copy_button_label();
    let label_color = match label {
        crate::constants::MSG_COPY_DONE => theme::SUCCESS,
        crate::constants::MSG_COPY_UNAVAILABLE => theme::WARNING,
        _ => theme::ACCENT_PRIMARY,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Config Preview ")
        .title_bottom(
            Line::from(vec![
                Span::styled(" [y] ", Style::default().fg(theme::TEXT_SECONDARY)),
                Span::styled(format!("{label} "), Style::default().fg(label_color)),
            ])
            .right_aligned(),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            preview_meta(&app.session.selection),
            Style::default().fg(theme::TEXT_SECONDARY),
        ))
        .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let snippet = crate::snippet::build(&app.session.selection);
    let lines: Vec<Line> = snippet
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), snippet_style(l))))
        .collect();

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

/// One-line summary of what the snippet was generated for.
fn preview_meta(selection: &SelectionState) -> String {
    format!(
        "Target · {}  Region · {}  Protocol · {}",
        selection.deployment_target.id(),
        selection.region().aws_region,
        selection.protocol().name
    )
}

fn snippet_style(line: &str) -> Style {
    let trimmed = line.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('#') {
        Style::default().fg(theme::ACCENT_SECONDARY)
    } else {
        Style::default().fg(theme::TEXT_PRIMARY)
    }
}

fn render_diagnostics(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Diagnostics ")
        .title_bottom(Line::from(" [t] Run checks ").right_aligned());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.session.diagnostics.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                MSG_NO_DIAGNOSTICS,
                Style::default().fg(theme::INACTIVE),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = app
        .session
        .diagnostics
        .iter()
        .map(|msg| Line::from(Span::styled(msg.as_str(), diagnostic_style(msg))))
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn diagnostic_style(message: &str) -> Style {
    let color: Color = if message.starts_with('✅') {
        theme::SUCCESS
    } else if message.starts_with('⚠') {
        theme::WARNING
    } else {
        theme::TEXT_SECONDARY
    };
    Style::default().fg(color)
}
