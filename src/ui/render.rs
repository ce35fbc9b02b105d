use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::{format_amount, format_count, format_optional_amount, truncate, NO_VALUE};

const SIDEBAR_WIDTH: u16 = 36;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(SIDEBAR_WIDTH)])
        .split(chunks[1]);

    render_tab_bar(f, chunks[0], app);
    render_screen(f, body[0], app);
    render_sidebar(f, body[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Overview => super::screens::overview::render(f, area, app),
        Screen::Timeline => super::screens::timeline::render(f, area, app),
        Screen::Vendors => super::screens::vendors::render(f, area, app),
        Screen::Details => super::screens::details::render(f, area, app),
    }
}

// ── Sidebar ──────────────────────────────────────────────────

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Filters
            Constraint::Length(8), // Summary
            Constraint::Min(4),    // Alerts
        ])
        .split(area);

    render_filters(f, chunks[0], app);
    render_summary(f, chunks[1], app);
    render_alerts(f, chunks[2], app);
}

fn filter_line(key: &'static str, value: String, active: bool) -> Line<'static> {
    let value_style = if active {
        Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };
    Line::from(vec![
        Span::styled(format!(" {key:<8}"), theme::dim_style()),
        Span::styled(value, value_style),
    ])
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let sel = &app.selection;
    let width = area.width.saturating_sub(12) as usize;
    let all = || "all".to_string();
    let bounds = app.table.value_bounds();

    let lines = vec![
        filter_line(
            "Sector",
            sel.sector.as_deref().map_or_else(all, |s| truncate(s, width)),
            sel.sector.is_some(),
        ),
        filter_line(
            "Vendor",
            sel.vendor.as_deref().map_or_else(all, |v| truncate(v, width)),
            sel.vendor.is_some(),
        ),
        filter_line(
            "Year",
            sel.year.map_or_else(all, |y| y.to_string()),
            sel.year.is_some(),
        ),
        filter_line(
            "Month",
            sel.month.map_or_else(all, |m| m.to_string()),
            sel.month.is_some(),
        ),
        filter_line(
            "Min",
            format_amount(sel.value_range.0),
            bounds.is_some_and(|(lo, _)| sel.value_range.0 > lo),
        ),
        filter_line(
            "Max",
            format_amount(sel.value_range.1),
            bounds.is_some_and(|(_, hi)| sel.value_range.1 < hi),
        ),
        filter_line(
            "Search",
            if sel.search.is_empty() {
                NO_VALUE.to_string()
            } else {
                truncate(&sel.search, width)
            },
            !sel.search.is_empty(),
        ),
    ];

    f.render_widget(Paragraph::new(lines).block(theme::panel("Filters")), area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let d = &app.dashboard;
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                " Showing {} of {} records",
                format_count(d.shown),
                format_count(d.total_records)
            ),
            theme::normal_style(),
        )),
        Line::from(vec![
            Span::styled(" Mean  ", theme::dim_style()),
            Span::styled(format_optional_amount(d.mean), theme::value_style()),
        ]),
        Line::from(vec![
            Span::styled(" Max   ", theme::dim_style()),
            Span::styled(format_optional_amount(d.max), theme::value_style()),
        ]),
        Line::from(vec![
            Span::styled(" Min   ", theme::dim_style()),
            Span::styled(format_optional_amount(d.min), theme::value_style()),
        ]),
    ];
    if d.is_empty() {
        lines.push(Line::from(Span::styled(
            " No records match; :reset clears filters",
            theme::dim_style(),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(theme::panel("Summary")), area);
}

fn render_alerts(f: &mut Frame, area: Rect, app: &App) {
    let messages = app.dashboard.alerts.messages();
    let lines: Vec<Line> = if messages.is_empty() {
        vec![Line::from(Span::styled(" No alerts", theme::dim_style()))]
    } else {
        messages
            .into_iter()
            .map(|m| Line::from(Span::styled(format!(" ! {m}"), theme::alert_style())))
            .collect()
    };

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(theme::panel("Alerts"));
    f.render_widget(para, area);
}

// ── Bars ─────────────────────────────────────────────────────

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Search => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(
        " {} | {} | {} records",
        app.screen,
        app.selection.describe(),
        format_count(app.dashboard.shown)
    );

    let right = match app.screen {
        Screen::Details => " j/k scroll | :sort :order :rows | ? help ",
        _ => " s/v/y/m cycle filters | / search | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Search => {
            let match_info = if !app.search_input.is_empty() {
                format!("  ({} matches)", format_count(app.dashboard.shown))
            } else {
                String::new()
            };
            (
                Line::from(vec![
                    Span::styled("/", Style::default().fg(theme::YELLOW)),
                    Span::styled(&app.search_input, theme::command_bar_style()),
                    Span::styled(match_info, theme::dim_style()),
                ]),
                Some(1 + app.search_input.chars().count() as u16),
            )
        }
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " Empenhos Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", theme::section_style())),
        Line::from(Span::styled(
            "  1-4              Switch tabs           Tab/Shift-Tab  Cycle tabs",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down   Scroll details        g/G            Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-d/u         Page Down/Up          Ctrl-q         Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Filters", theme::section_style())),
        Line::from(Span::styled(
            "  s/S  v/V         Next/prev sector, vendor",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  y/Y  m/M         Next/prev year, month",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  /                Search vendor or contract (live)",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Esc              Clear status and search",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", theme::section_style())),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<10} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
