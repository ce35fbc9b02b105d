use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table},
    Frame,
};

use super::render_empty;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, truncate, NO_VALUE};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let slice = &app.dashboard.details;
    let title = if slice.is_truncated() {
        format!(
            "Details ({} of {}, by {} {})",
            slice.limit.get(),
            slice.total_rows,
            slice.sort,
            slice.direction
        )
    } else {
        format!(
            "Details ({}, by {} {})",
            slice.total_rows, slice.sort, slice.direction
        )
    };

    if slice.rows.is_empty() {
        render_empty(f, area, &title);
        return;
    }

    let header_cells = ["ITEM", "SETOR", "EMPRESA", "VALOR", "COMPETENCIA", "CONTRATO"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = slice
        .rows
        .iter()
        .enumerate()
        .skip(app.detail_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let style = if i == app.detail_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(truncate(record.item.as_deref().unwrap_or(NO_VALUE), 24)),
                Cell::from(truncate(&record.sector, 20)),
                Cell::from(truncate(&record.vendor, 30)),
                Cell::from(format_amount(record.value)),
                Cell::from(format_date(record.competencia)),
                Cell::from(record.contract.as_deref().unwrap_or(NO_VALUE).to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(&title));

    f.render_widget(table, area);
}
