use rust_decimal::Decimal;

use crate::metrics::Concentration;
use crate::models::Period;

/// A labelled sequence of (category or period, value) points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Series {
    pub(crate) title: &'static str,
    pub(crate) points: Vec<(String, Decimal)>,
}

impl Series {
    pub(crate) fn from_grouped(title: &'static str, grouped: Vec<(String, Decimal)>) -> Self {
        Self {
            title,
            points: grouped,
        }
    }

    pub(crate) fn from_periods(title: &'static str, periods: Vec<(Period, Decimal)>) -> Self {
        Self {
            title,
            points: periods
                .into_iter()
                .map(|(p, v)| (p.to_string(), v))
                .collect(),
        }
    }

    /// Two slices: the top `k` groups and everyone else.
    pub(crate) fn from_concentration(title: &'static str, c: Concentration, k: usize) -> Self {
        Self {
            title,
            points: vec![
                (format!("Top {k}"), c.head),
                ("Others".to_string(), c.remainder),
            ],
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
