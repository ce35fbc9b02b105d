use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Gauge, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::render_empty;
use crate::present::CONCENTRATION_K;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_count, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_ranking(f, chunks[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(chunks[1]);

    render_concentration(f, right[0], app);
    render_vendors_per_sector(f, right[1], app);
}

fn render_ranking(f: &mut Frame, area: Rect, app: &App) {
    let ranking = &app.dashboard.vendor_ranking;
    let title = format!("Vendor Ranking (top {})", ranking.len());
    if ranking.is_empty() {
        render_empty(f, area, &title);
        return;
    }

    let header = Row::new(
        ["#", "Vendor", "Total", "Records", "Mean"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = ranking
        .iter()
        .enumerate()
        .map(|(i, stats)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&stats.key, 32)),
                Cell::from(format_amount(stats.total)).style(theme::value_style()),
                Cell::from(format_count(stats.count)),
                Cell::from(format_amount(stats.mean)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Length(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(&title));

    f.render_widget(table, area);
}

fn render_concentration(f: &mut Frame, area: Rect, app: &App) {
    let series = app.dashboard.concentration_series();
    let c = app.dashboard.concentration;
    let total = c.total();
    if total.is_zero() {
        render_empty(f, area, series.title);
        return;
    }

    let ratio = (c.head / total).to_f64().unwrap_or(0.0).clamp(0.0, 1.0);

    let block = theme::panel(series.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::ACCENT).bg(theme::SURFACE))
        .ratio(ratio)
        .label(Span::styled(
            format!("{:.1}% in top {CONCENTRATION_K}", ratio * 100.0),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, rows[0]);

    let lines: Vec<Line> = series
        .points
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<8}"), theme::dim_style()),
                Span::styled(format_amount(*value), theme::value_style()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), rows[2]);
}

fn render_vendors_per_sector(f: &mut Frame, area: Rect, app: &App) {
    let per_sector = &app.dashboard.vendors_per_sector;
    if per_sector.is_empty() {
        render_empty(f, area, "Vendors per Sector");
        return;
    }

    let header = Row::new(
        ["Sector", "Vendors"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );
    let rows: Vec<Row> = per_sector
        .iter()
        .enumerate()
        .map(|(i, (sector, n))| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![Cell::from(truncate(sector, 28)), Cell::from(format_count(*n))])
                .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(12), Constraint::Length(8)])
        .header(header)
        .block(theme::panel("Vendors per Sector"));

    f.render_widget(table, area);
}
