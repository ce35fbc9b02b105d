use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

/// `YYYY-MM` or `YYYY/MM` with nothing after it, or `MM/YYYY`.
static YEAR_MONTH: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]{4})[-/]([0-9]{1,2})|([0-9]{1,2})/([0-9]{4}))$").ok()
});

/// Lenient date parsing for the COMPETENCIA / VENCIMENTO_CONTRATO columns.
/// Anything unrecognised yields `None` rather than an error.
pub(crate) fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // Timezone-qualified timestamps: keep the calendar date as written.
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let caps = YEAR_MONTH.as_ref()?.captures(s)?;
    let (year, month) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
        (Some(y), Some(m), _, _) | (_, _, Some(m), Some(y)) => (y.as_str(), m.as_str()),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

#[cfg(test)]
#[path = "dates_tests.rs"]
mod tests;
