#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::import::load_from_reader;
use crate::models::{Record, Table};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn with_expiration(value: Decimal, exp: Option<NaiveDate>) -> Record {
    let mut r = Record::new("TI", "Acme", value);
    r.contract_expiration = exp;
    r
}

fn full_record() -> Record {
    Record {
        item: Some("Luvas, caixa c/ 100".into()),
        sector: "Farmácia".into(),
        vendor: "Acme \"Hospitalar\" Ltda".into(),
        contract: Some("CT-2025/01".into()),
        value: dec!(1234.56),
        competencia: Some(ymd(2025, 1, 15)),
        contract_expiration: Some(ymd(2025, 12, 31)),
    }
}

// ── to_portable_text ──────────────────────────────────────────

#[test]
fn test_portable_text_header_and_raw_values() {
    let table = Table::new(vec![full_record()]);
    let text = to_portable_text(&table.view()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ITEM,SETOR,EMPRESA,CONTRATO,VALOR,COMPETENCIA,VENCIMENTO_CONTRATO"
    );
    let row = lines.next().unwrap();
    assert!(row.contains(",1234.56,"));
    assert!(!row.contains("R$"));
    assert!(row.contains("2025-01-15"));
}

#[test]
fn test_portable_text_absent_values_are_empty() {
    let table = Table::new(vec![Record::new("TI", "Beta", dec!(5))]);
    let text = to_portable_text(&table.view()).unwrap();
    assert_eq!(text.lines().nth(1).unwrap(), ",TI,Beta,,5,,");
}

#[test]
fn test_portable_text_roundtrip() {
    let mut second = Record::new("TI", "Beta", dec!(0.10));
    second.competencia = Some(ymd(2024, 12, 1));
    let table = Table::new(vec![full_record(), second, Record::new("", "Gamma", dec!(7))]);

    let text = to_portable_text(&table.view()).unwrap();
    let reloaded = load_from_reader(text.as_bytes()).unwrap();
    assert_eq!(reloaded.records(), table.records());
}

#[test]
fn test_portable_text_empty_view_has_header_only() {
    let table = Table::default();
    let text = to_portable_text(&table.view()).unwrap();
    assert_eq!(text.lines().count(), 1);
}

// ── File naming / writing ─────────────────────────────────────

#[test]
fn test_export_file_name_format() {
    let now = ymd(2025, 3, 7).and_hms_opt(9, 5, 1).unwrap();
    assert_eq!(
        export_file_name("empenhos_filtrados", now),
        "empenhos_filtrados_20250307_090501.csv"
    );
}

#[test]
fn test_write_export_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let table = Table::new(vec![full_record()]);
    let now = ymd(2025, 3, 7).and_hms_opt(9, 5, 1).unwrap();
    let path = write_export(&table.view(), &dir.path().join("out"), now).unwrap();
    assert!(path.ends_with("empenhos_filtrados_20250307_090501.csv"));
    let reloaded = crate::import::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
}

// ── Alerts ────────────────────────────────────────────────────

#[test]
fn test_expiring_contracts_window() {
    let table = Table::new(vec![
        with_expiration(dec!(1), Some(ymd(2025, 6, 15))),
        with_expiration(dec!(2), Some(ymd(2025, 7, 15))),
    ]);
    let hits = expiring_contracts(&table.view(), ymd(2025, 6, 1), 30);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.rows()[0].value, dec!(1));
}

#[test]
fn test_expiring_contracts_boundaries() {
    let table = Table::new(vec![
        with_expiration(dec!(1), Some(ymd(2025, 6, 1))),  // as_of itself: excluded
        with_expiration(dec!(2), Some(ymd(2025, 7, 1))),  // exactly +30: included
        with_expiration(dec!(3), Some(ymd(2025, 7, 2))),  // +31: excluded
        with_expiration(dec!(4), Some(ymd(2025, 5, 1))),  // already expired
        with_expiration(dec!(5), None),
    ]);
    let hits = expiring_contracts(&table.view(), ymd(2025, 6, 1), 30);
    let values: Vec<Decimal> = hits.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![dec!(2)]);
}

#[test]
fn test_high_value_outliers() {
    let values: Vec<Record> = (1..=20)
        .map(|v| with_expiration(Decimal::from(v), None))
        .collect();
    let table = Table::new(values);
    // p95 of 1..=20 is 19.05, so only 20 exceeds it
    let hits = high_value_outliers(&table.view());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.rows()[0].value, dec!(20));
}

#[test]
fn test_high_value_outliers_empty_view() {
    let table = Table::default();
    assert!(high_value_outliers(&table.view()).is_empty());
}

#[test]
fn test_high_value_outliers_all_equal() {
    let table = Table::new(vec![
        with_expiration(dec!(5), None),
        with_expiration(dec!(5), None),
    ]);
    assert!(high_value_outliers(&table.view()).is_empty());
}

#[test]
fn test_alerts_messages() {
    let table = Table::new(vec![
        with_expiration(dec!(1), Some(ymd(2025, 6, 15))),
        with_expiration(dec!(100), None),
    ]);
    let alerts = Alerts::compute(&table.view(), ymd(2025, 6, 1), 30);
    assert_eq!(alerts.expiring, 1);
    assert_eq!(alerts.outliers, 1);
    let msgs = alerts.messages();
    assert_eq!(msgs.len(), 2);
    assert!(msgs[0].contains("30 days"));

    let quiet = Alerts::compute(&Table::default().view(), ymd(2025, 6, 1), 30);
    assert!(quiet.messages().is_empty());
}
