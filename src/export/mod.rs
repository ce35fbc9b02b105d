mod alerts;

pub(crate) use alerts::{expiring_contracts, high_value_outliers, Alerts};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::import::COLUMNS;
use crate::models::View;

pub(crate) const DEFAULT_PREFIX: &str = "empenhos_filtrados";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serialize a view as CSV that [`crate::import::load`] reads
/// back unchanged: fixed column order, raw decimals, ISO dates, absent
/// values as empty cells.
pub(crate) fn to_portable_text(view: &View<'_>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(COLUMNS)?;

    let fmt_date = |d: Option<NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    for r in view {
        let value = r.value.to_string();
        let competencia = fmt_date(r.competencia);
        let expiration = fmt_date(r.contract_expiration);
        wtr.write_record([
            r.item.as_deref().unwrap_or(""),
            r.sector.as_str(),
            r.vendor.as_str(),
            r.contract.as_deref().unwrap_or(""),
            value.as_str(),
            competencia.as_str(),
            expiration.as_str(),
        ])
        .context("Failed to write CSV record")?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("Export produced invalid UTF-8")
}

/// `prefix_YYYYMMDD_HHMMSS.csv`
pub(crate) fn export_file_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{prefix}_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write `view` into `dir` under a timestamped name and return the path.
pub(crate) fn write_export(view: &View<'_>, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(export_file_name(DEFAULT_PREFIX, now));
    let text = to_portable_text(view)?;
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    tracing::info!(rows = view.len(), path = %path.display(), "view exported");
    Ok(path)
}

#[cfg(test)]
mod tests;
