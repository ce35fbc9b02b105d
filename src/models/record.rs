use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// One budget commitment ("empenho") row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub item: Option<String>,
    pub sector: String,
    pub vendor: String,
    pub contract: Option<String>,
    pub value: Decimal,
    /// Accounting reference period.
    pub competencia: Option<NaiveDate>,
    pub contract_expiration: Option<NaiveDate>,
}

impl Record {
    #[cfg(test)]
    pub fn new(sector: impl Into<String>, vendor: impl Into<String>, value: Decimal) -> Self {
        Self {
            item: None,
            sector: sector.into(),
            vendor: vendor.into(),
            contract: None,
            value,
            competencia: None,
            contract_expiration: None,
        }
    }

    pub fn label(&self, field: Field) -> Option<&str> {
        match field {
            Field::Item => self.item.as_deref(),
            Field::Sector => Some(self.sector.as_str()),
            Field::Vendor => Some(self.vendor.as_str()),
            Field::Contract => self.contract.as_deref(),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.competencia.map(|d| d.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.competencia.map(|d| d.month())
    }
}

/// Categorical columns that can be grouped or counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Item,
    Sector,
    Vendor,
    Contract,
}

impl Field {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "item" => Some(Self::Item),
            "sector" | "setor" => Some(Self::Sector),
            "vendor" | "empresa" => Some(Self::Vendor),
            "contract" | "contrato" => Some(Self::Contract),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Sector => "Sector",
            Self::Vendor => "Vendor",
            Self::Contract => "Contract",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The loaded dataset. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// A view over every row, in table order.
    #[cfg(test)]
    pub fn view(&self) -> View<'_> {
        View::new(self.records.iter().collect())
    }

    /// Distinct sectors, sorted, for the sector picker.
    pub fn sectors(&self) -> Vec<String> {
        self.sorted_labels(Field::Sector)
    }

    /// Distinct vendors, sorted, for the vendor picker.
    pub fn vendors(&self) -> Vec<String> {
        self.sorted_labels(Field::Vendor)
    }

    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.iter().filter_map(Record::year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn months(&self) -> Vec<u32> {
        let mut months: Vec<u32> = self.iter().filter_map(Record::month).collect();
        months.sort_unstable();
        months.dedup();
        months
    }

    /// Observed (min, max) of `value`, or None for an empty table.
    pub fn value_bounds(&self) -> Option<(Decimal, Decimal)> {
        let mut iter = self.iter().map(|r| r.value);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    fn sorted_labels(&self, field: Field) -> Vec<String> {
        let mut labels: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.label(field))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// An ordered subset of a [`Table`], borrowing its rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> View<'a> {
    pub fn new(rows: Vec<&'a Record>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, &'a Record>> {
        self.rows.iter().copied()
    }

    /// Keep the rows matching `pred`, preserving order.
    pub fn retain(&self, mut pred: impl FnMut(&Record) -> bool) -> View<'a> {
        View::new(self.rows.iter().copied().filter(|r| pred(*r)).collect())
    }
}

impl<'b, 'a> IntoIterator for &'b View<'a> {
    type Item = &'a Record;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}
