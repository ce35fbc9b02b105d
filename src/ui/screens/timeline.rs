use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{BarChart, BarGroup, Cell, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use super::{render_empty, series_bars};
use crate::present::Series;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    render_monthly(f, chunks[0], &app.dashboard.monthly);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_quarterly_chart(f, bottom[0], &app.dashboard.quarterly);
    render_quarterly_table(f, bottom[1], &app.dashboard.quarterly);
}

fn render_monthly(f: &mut Frame, area: Rect, series: &Series) {
    if series.is_empty() {
        render_empty(f, area, series.title);
        return;
    }

    // Newest months win when the chart is too narrow for all of them.
    let fits = (area.width.saturating_sub(2) / 8).max(1) as usize;
    let bars = series_bars(series, 7);
    let skip = bars.len().saturating_sub(fits);

    let chart = BarChart::default()
        .block(theme::panel(series.title))
        .data(BarGroup::default().bars(&bars[skip..]))
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_quarterly_chart(f: &mut Frame, area: Rect, series: &Series) {
    if series.is_empty() {
        render_empty(f, area, series.title);
        return;
    }

    let bars = series_bars(series, 7);
    let chart = BarChart::default()
        .block(theme::panel(series.title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::MAUVE))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_quarterly_table(f: &mut Frame, area: Rect, series: &Series) {
    let total: Decimal = series.points.iter().map(|(_, v)| *v).sum();

    let header = Row::new(
        ["Quarter", "Total", "Share"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = series
        .points
        .iter()
        .rev()
        .enumerate()
        .map(|(i, (period, value))| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                (*value / total * Decimal::ONE_HUNDRED).round_dp(1)
            };
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(period.clone()),
                Cell::from(format_amount(*value)).style(theme::value_style()),
                Cell::from(format!("{share}%")),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel("Quarters, newest first"));

    f.render_widget(table, area);
}
