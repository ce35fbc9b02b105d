use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::dates::parse_date_lenient;
use crate::models::{Record, Table};

pub(crate) const COL_ITEM: &str = "ITEM";
pub(crate) const COL_SECTOR: &str = "SETOR";
pub(crate) const COL_VENDOR: &str = "EMPRESA";
pub(crate) const COL_CONTRACT: &str = "CONTRATO";
pub(crate) const COL_VALUE: &str = "VALOR";
pub(crate) const COL_COMPETENCIA: &str = "COMPETENCIA";
pub(crate) const COL_EXPIRATION: &str = "VENCIMENTO_CONTRATO";

/// Column order used for both input validation and export.
pub(crate) const COLUMNS: [&str; 7] = [
    COL_ITEM,
    COL_SECTOR,
    COL_VENDOR,
    COL_CONTRACT,
    COL_VALUE,
    COL_COMPETENCIA,
    COL_EXPIRATION,
];

/// Positions of the required columns in the source header.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    item: usize,
    sector: usize,
    vendor: usize,
    contract: usize,
    value: usize,
    competencia: usize,
    expiration: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_uppercase())
            .collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        let missing: Vec<&str> = COLUMNS.iter().copied().filter(|c| find(c).is_none()).collect();
        if !missing.is_empty() {
            anyhow::bail!("Missing required column(s): {}", missing.join(", "));
        }

        let col = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            item: col(COL_ITEM),
            sector: col(COL_SECTOR),
            vendor: col(COL_VENDOR),
            contract: col(COL_CONTRACT),
            value: col(COL_VALUE),
            competencia: col(COL_COMPETENCIA),
            expiration: col(COL_EXPIRATION),
        })
    }
}

/// Load the dataset from a CSV file on disk.
pub(crate) fn load(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;
    let table = load_from_reader(file)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))?;
    tracing::info!(rows = table.len(), path = %path.display(), "dataset loaded");
    Ok(table)
}

/// Load the dataset from any CSV source with a header row.
pub(crate) fn load_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let cols = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut bad_dates = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let row_no = i + 1;
        let row = result.with_context(|| format!("Row {row_no}: failed to read CSV record"))?;
        let (record, unparsed) = parse_row(&row, &cols)
            .with_context(|| format!("Row {row_no}: invalid record"))?;
        if unparsed > 0 {
            tracing::debug!(row = row_no, "unparseable date treated as absent");
            bad_dates += unparsed;
        }
        records.push(record);
    }

    if bad_dates > 0 {
        tracing::warn!(count = bad_dates, "date values could not be parsed");
    }
    Ok(Table::new(records))
}

/// Build a record from one CSV row. Also returns how many non-empty date
/// cells failed to parse.
fn parse_row(row: &csv::StringRecord, cols: &ColumnMap) -> Result<(Record, usize)> {
    let cell = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");
    let optional = |idx: usize| {
        let s = cell(idx);
        (!s.is_empty()).then(|| s.to_string())
    };

    let value = parse_value(cell(cols.value))?;

    let mut unparsed = 0;
    let mut date = |idx: usize| {
        let raw = cell(idx);
        let parsed = parse_date_lenient(raw);
        if parsed.is_none() && !raw.is_empty() {
            unparsed += 1;
        }
        parsed
    };
    let competencia = date(cols.competencia);
    let contract_expiration = date(cols.expiration);

    Ok((
        Record {
            item: optional(cols.item),
            sector: cell(cols.sector).to_string(),
            vendor: cell(cols.vendor).to_string(),
            contract: optional(cols.contract),
            value,
            competencia,
            contract_expiration,
        },
        unparsed,
    ))
}

/// Parse a VALOR cell. Plain decimals are expected; an `R$` prefix and
/// scientific notation are tolerated.
pub(crate) fn parse_value(s: &str) -> Result<Decimal> {
    let cleaned = s.trim().trim_start_matches("R$").trim();
    if cleaned.is_empty() {
        anyhow::bail!("missing {COL_VALUE}");
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .with_context(|| format!("Failed to parse '{s}' as {COL_VALUE}"))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
