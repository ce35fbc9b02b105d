#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::io::Write;

const HEADER: &str = "ITEM,SETOR,EMPRESA,CONTRATO,VALOR,COMPETENCIA,VENCIMENTO_CONTRATO\n";

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── parse_value ───────────────────────────────────────────────

#[test]
fn test_parse_value_plain() {
    assert_eq!(parse_value("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_value(" 42 ").unwrap(), dec!(42));
}

#[test]
fn test_parse_value_currency_prefix() {
    assert_eq!(parse_value("R$ 1234.56").unwrap(), dec!(1234.56));
}

#[test]
fn test_parse_value_scientific() {
    assert_eq!(parse_value("1.5e3").unwrap(), dec!(1500));
}

#[test]
fn test_parse_value_invalid() {
    assert!(parse_value("").is_err());
    assert!(parse_value("abc").is_err());
}

// ── load_from_reader ──────────────────────────────────────────

#[test]
fn test_load_basic_rows() {
    let csv = format!(
        "{HEADER}Luvas,Farmácia,Acme,CT-1,100.00,2025-01-15,2025-12-31\n\
         ,TI,Beta,,50.5,2025-02-01,\n"
    );
    let table = load_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);

    let first = &table.records()[0];
    assert_eq!(first.item.as_deref(), Some("Luvas"));
    assert_eq!(first.sector, "Farmácia");
    assert_eq!(first.vendor, "Acme");
    assert_eq!(first.contract.as_deref(), Some("CT-1"));
    assert_eq!(first.value, dec!(100.00));
    assert_eq!(first.competencia, Some(ymd(2025, 1, 15)));
    assert_eq!(first.contract_expiration, Some(ymd(2025, 12, 31)));

    let second = &table.records()[1];
    assert!(second.item.is_none());
    assert!(second.contract.is_none());
    assert!(second.contract_expiration.is_none());
}

#[test]
fn test_load_columns_in_any_order_with_extras() {
    let csv = "VALOR,EXTRA,empresa,SETOR,COMPETENCIA,ITEM,CONTRATO,VENCIMENTO_CONTRATO\n\
               10,x,Acme,TI,2025-03-01,Mouse,C9,\n";
    let table = load_from_reader(csv.as_bytes()).unwrap();
    let r = &table.records()[0];
    assert_eq!(r.value, dec!(10));
    assert_eq!(r.vendor, "Acme");
    assert_eq!(r.sector, "TI");
    assert_eq!(r.item.as_deref(), Some("Mouse"));
}

#[test]
fn test_load_bad_dates_become_absent() {
    let csv = format!("{HEADER}A,TI,Acme,C1,10,garbage,also garbage\n");
    let table = load_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.records()[0].competencia.is_none());
    assert!(table.records()[0].contract_expiration.is_none());
}

#[test]
fn test_load_missing_columns_is_error() {
    let csv = "ITEM,SETOR,EMPRESA,VALOR\nA,TI,Acme,10\n";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("CONTRATO"));
    assert!(msg.contains("COMPETENCIA"));
    assert!(msg.contains("VENCIMENTO_CONTRATO"));
}

#[test]
fn test_load_bad_value_reports_row() {
    let csv = format!("{HEADER}A,TI,Acme,C1,10,,\nB,TI,Acme,C2,oops,,\n");
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(format!("{err:#}").contains("Row 2"));
}

#[test]
fn test_load_header_only_is_empty_table() {
    let table = load_from_reader(HEADER.as_bytes()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_load_tolerates_bom() {
    let csv = format!("\u{feff}{HEADER}A,TI,Acme,C1,10,,\n");
    let table = load_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 1);
}

// ── load (file) ───────────────────────────────────────────────

#[test]
fn test_load_from_file() {
    let file = make_csv_file(&format!("{HEADER}A,TI,Acme,C1,10,2025-01-01,\n"));
    let table = load(file.path()).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_load_missing_file_is_error() {
    let err = load(Path::new("/definitely/not/here/processed_data.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to open dataset"));
}
