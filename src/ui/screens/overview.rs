use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, BarGroup, Paragraph, Sparkline},
    Frame,
};

use super::{render_empty, series_bars};
use crate::present::Series;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_count, format_optional_amount};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Metric cards
            Constraint::Min(10),   // Sector / vendor charts
            Constraint::Length(6), // Value distribution
        ])
        .split(area);

    render_cards(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let d = &app.dashboard;
    render_sector_chart(f, charts[0], &d.by_sector);
    render_vendor_chart(f, charts[1], &d.top_vendors);
    render_distribution(f, chunks[2], app);
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let d = &app.dashboard;
    render_card(
        f,
        cards[0],
        "Total Committed",
        format_amount(d.total_value),
        theme::GREEN,
    );
    render_card(
        f,
        cards[1],
        "Records",
        format!("{} of {}", format_count(d.shown), format_count(d.total_records)),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[2],
        "Vendors / Sectors",
        format!(
            "{} / {}",
            format_count(d.distinct_vendors),
            format_count(d.distinct_sectors)
        ),
        theme::TEAL,
    );
    render_card(
        f,
        cards[3],
        "Mean Value",
        format_optional_amount(d.mean),
        theme::MAUVE,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: ratatui::style::Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_sector_chart(f: &mut Frame, area: Rect, series: &Series) {
    if series.is_empty() {
        render_empty(f, area, series.title);
        return;
    }

    let bars = series_bars(series, 10);
    let chart = BarChart::default()
        .block(theme::panel(series.title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_vendor_chart(f: &mut Frame, area: Rect, series: &Series) {
    if series.is_empty() {
        render_empty(f, area, series.title);
        return;
    }

    let bars = series_bars(series, 18);
    let chart = BarChart::default()
        .block(theme::panel(series.title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(theme::TEAL))
        .value_style(Style::default().fg(theme::HEADER_BG).bg(theme::TEAL));

    f.render_widget(chart, area);
}

fn render_distribution(f: &mut Frame, area: Rect, app: &App) {
    let bins = &app.dashboard.distribution;
    let title = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => format!(
            "Value Distribution ({} to {}, {} bins)",
            format_amount(first.lower),
            format_amount(last.upper),
            bins.len()
        ),
        _ => "Value Distribution".to_string(),
    };
    if bins.is_empty() {
        render_empty(f, area, &title);
        return;
    }

    let data: Vec<u64> = bins.iter().map(|b| b.count as u64).collect();
    let sparkline = Sparkline::default()
        .block(theme::panel(&title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
