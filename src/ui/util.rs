use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Placeholder for values that are undefined for the current view.
pub(crate) const NO_VALUE: &str = "—";

/// Format a decimal amount as Brazilian reais with thousand separators and
/// 2 decimal places, e.g. `1234567.891` → `"R$ 1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-R$ {with_commas}.{dec_part}")
    } else {
        format!("R$ {with_commas}.{dec_part}")
    }
}

/// Short form for chart labels: `1534000` → `"1.5M"`, `820` → `"820"`.
pub(crate) fn format_compact(val: Decimal) -> String {
    let abs = val.abs();
    let sign = if val < Decimal::ZERO { "-" } else { "" };
    let (scaled, suffix) = if abs >= Decimal::from(1_000_000_000) {
        (abs / Decimal::from(1_000_000_000), "B")
    } else if abs >= Decimal::from(1_000_000) {
        (abs / Decimal::from(1_000_000), "M")
    } else if abs >= Decimal::from(1_000) {
        (abs / Decimal::from(1_000), "k")
    } else {
        return format!("{sign}{}", abs.round_dp(0));
    };
    format!("{sign}{}{suffix}", scaled.round_dp(1).normalize())
}

/// Like [`format_amount`] but shows [`NO_VALUE`] for undefined metrics.
pub(crate) fn format_optional_amount(val: Option<Decimal>) -> String {
    val.map(format_amount).unwrap_or_else(|| NO_VALUE.to_string())
}

pub(crate) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_VALUE.to_string())
}

/// Integer with thousand separators, e.g. `12345` → `"12,345"`
pub(crate) fn format_count(n: usize) -> String {
    let digits = n.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Step through `[all, options...]`. `None` stands for "all"; a current value
/// not in `options` restarts from "all".
pub(crate) fn cycle_option<T: Clone + PartialEq>(
    options: &[T],
    current: Option<&T>,
    forward: bool,
) -> Option<T> {
    let slots = options.len() + 1;
    let pos = current
        .and_then(|c| options.iter().position(|o| o == c))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (pos + 1) % slots
    } else {
        (pos + slots - 1) % slots
    };
    next.checked_sub(1).and_then(|i| options.get(i).cloned())
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
