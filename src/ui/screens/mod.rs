pub(crate) mod details;
pub(crate) mod overview;
pub(crate) mod timeline;
pub(crate) mod vendors;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::present::Series;
use crate::ui::theme;
use crate::ui::util::{format_compact, truncate};

/// Bar heights are whole reais; fractions and negatives don't register.
fn bar_height(value: Decimal) -> u64 {
    value.round().to_u64().unwrap_or(0)
}

/// One bar per point, labelled with the (truncated) key and a compact amount.
pub(crate) fn series_bars(series: &Series, label_width: usize) -> Vec<Bar<'static>> {
    series
        .points
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(bar_height(*value))
                .text_value(format_compact(*value))
                .label(Line::from(truncate(label, label_width)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect()
}

/// Placeholder panel when the current filters leave nothing to chart.
pub(crate) fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No records match the current filters",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use :reset to clear them",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(theme::panel(title));
    f.render_widget(msg, area);
}
