use rust_decimal::Decimal;

use super::Table;

/// The current filter choices. `None` means "all" for the categorical
/// and calendar predicates; the value range is always applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub sector: Option<String>,
    pub vendor: Option<String>,
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    /// Inclusive (min, max).
    pub value_range: (Decimal, Decimal),
    pub search: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            sector: None,
            vendor: None,
            year: None,
            month: None,
            value_range: (Decimal::MIN, Decimal::MAX),
            search: String::new(),
        }
    }
}

impl FilterSelection {
    /// Identity selection for `table`: every predicate set to "all" and the
    /// value range spanning the observed min/max.
    pub fn for_table(table: &Table) -> Self {
        let value_range = table
            .value_bounds()
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));
        Self {
            value_range,
            ..Self::default()
        }
    }

    pub fn with_sector(self, sector: Option<String>) -> Self {
        Self { sector, ..self }
    }

    pub fn with_vendor(self, vendor: Option<String>) -> Self {
        Self { vendor, ..self }
    }

    pub fn with_year(self, year: Option<i32>) -> Self {
        Self { year, ..self }
    }

    pub fn with_month(self, month: Option<u32>) -> Self {
        Self { month, ..self }
    }

    pub fn with_min(self, min: Decimal) -> Self {
        Self {
            value_range: (min, self.value_range.1),
            ..self
        }
    }

    pub fn with_max(self, max: Decimal) -> Self {
        Self {
            value_range: (self.value_range.0, max),
            ..self
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    /// Short human description of the active predicates, e.g. for status bars.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(s) = &self.sector {
            parts.push(format!("sector={s}"));
        }
        if let Some(v) = &self.vendor {
            parts.push(format!("vendor={v}"));
        }
        if let Some(y) = self.year {
            parts.push(format!("year={y}"));
        }
        if let Some(m) = self.month {
            parts.push(format!("month={m}"));
        }
        if !self.search.is_empty() {
            parts.push(format!("search='{}'", self.search));
        }
        if parts.is_empty() {
            "no filters".into()
        } else {
            parts.join(", ")
        }
    }
}
