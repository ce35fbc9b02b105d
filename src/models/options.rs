use chrono::{Datelike, NaiveDate};

/// Column the details table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Value,
    Period,
    Vendor,
    Sector,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Period => "period",
            Self::Vendor => "vendor",
            Self::Sector => "sector",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "value" | "valor" => Some(Self::Value),
            "period" | "competencia" | "date" => Some(Self::Period),
            "vendor" | "empresa" => Some(Self::Vendor),
            "sector" | "setor" => Some(Self::Sector),
            _ => None,
        }
    }

    pub fn all() -> &'static [SortField] {
        &[Self::Value, Self::Period, Self::Vendor, Self::Sector]
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "crescente" => Some(Self::Ascending),
            "desc" | "descending" | "decrescente" => Some(Self::Descending),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Number of rows shown in the details table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLimit(usize);

impl RowLimit {
    pub const CHOICES: [usize; 4] = [50, 100, 200, 500];

    /// Accepts only the supported page sizes.
    pub fn new(n: usize) -> Option<Self> {
        Self::CHOICES.contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Next supported size, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::CHOICES.iter().position(|&c| c == self.0).unwrap_or(0);
        Self(Self::CHOICES[(idx + 1) % Self::CHOICES.len()])
    }
}

impl Default for RowLimit {
    fn default() -> Self {
        Self(Self::CHOICES[0])
    }
}

/// User-chosen layout of the details table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailOptions {
    pub sort: SortField,
    pub direction: SortDirection,
    pub limit: RowLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Month,
    Quarter,
}

/// A calendar bucket of `competencia`. Ordering is chronological for
/// periods of the same granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    /// Month 1-12 or quarter 1-4, depending on `granularity`.
    pub index: u32,
    pub granularity: Granularity,
}

impl Period {
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        let index = match granularity {
            Granularity::Month => date.month(),
            Granularity::Quarter => (date.month() - 1) / 3 + 1,
        };
        Self {
            year: date.year(),
            index,
            granularity,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.granularity {
            Granularity::Month => write!(f, "{}-{:02}", self.year, self.index),
            Granularity::Quarter => write!(f, "{}Q{}", self.year, self.index),
        }
    }
}
