use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::metrics;
use crate::models::View;

/// Quantile above which a commitment is flagged as high-value.
pub(crate) const OUTLIER_QUANTILE: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Records whose contract expires after `as_of` and no later than
/// `as_of + within_days`. Records without an expiration never match.
pub(crate) fn expiring_contracts<'a>(view: &View<'a>, as_of: NaiveDate, within_days: u64) -> View<'a> {
    let Some(until) = as_of.checked_add_days(Days::new(within_days)) else {
        return View::default();
    };
    view.retain(|r| {
        r.contract_expiration
            .is_some_and(|exp| exp > as_of && exp <= until)
    })
}

/// Records whose value exceeds the view's 95th percentile. An empty view
/// yields an empty result.
pub(crate) fn high_value_outliers<'a>(view: &View<'a>) -> View<'a> {
    if view.is_empty() {
        return View::default();
    }
    match metrics::quantile(view, OUTLIER_QUANTILE) {
        Ok(threshold) => view.retain(|r| r.value > threshold),
        Err(e) => {
            tracing::warn!("outlier threshold unavailable: {e:#}");
            View::default()
        }
    }
}

/// Alert counts for the sidebar / `alerts` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Alerts {
    pub(crate) window_days: u64,
    pub(crate) expiring: usize,
    pub(crate) outliers: usize,
}

impl Alerts {
    pub(crate) fn compute(view: &View<'_>, today: NaiveDate, window_days: u64) -> Self {
        Self {
            window_days,
            expiring: expiring_contracts(view, today, window_days).len(),
            outliers: high_value_outliers(view).len(),
        }
    }

    /// Human-readable lines; empty when there is nothing to report.
    pub(crate) fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.expiring > 0 {
            out.push(format!(
                "{} contract(s) expire within {} days",
                self.expiring, self.window_days
            ));
        }
        if self.outliers > 0 {
            out.push(format!(
                "{} commitment(s) above the 95th percentile",
                self.outliers
            ));
        }
        out
    }
}
