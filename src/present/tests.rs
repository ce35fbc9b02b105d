#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::slice::sort_view;
use super::*;
use crate::models::{
    DetailOptions, FilterSelection, Record, RowLimit, SortDirection, SortField, Table,
};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn rec(sector: &str, vendor: &str, value: Decimal, comp: Option<NaiveDate>) -> Record {
    let mut r = Record::new(sector, vendor, value);
    r.competencia = comp;
    r
}

fn table() -> Table {
    Table::new(vec![
        rec("TI", "Delta", dec!(30), date(2025, 3, 1)),
        rec("Farmácia", "Alfa", dec!(10), None),
        rec("Limpeza", "Charlie", dec!(50), date(2025, 1, 1)),
        rec("TI", "Bravo", dec!(20), date(2025, 2, 1)),
    ])
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn vendors(rows: &[Record]) -> Vec<&str> {
    rows.iter().map(|r| r.vendor.as_str()).collect()
}

// ── sort_view ─────────────────────────────────────────────────

#[test]
fn test_sort_by_value_both_directions() {
    let t = table();
    let desc = sort_view(&t.view(), SortField::Value, SortDirection::Descending);
    let asc = sort_view(&t.view(), SortField::Value, SortDirection::Ascending);
    let d: Vec<Decimal> = desc.iter().map(|r| r.value).collect();
    let a: Vec<Decimal> = asc.iter().map(|r| r.value).collect();
    assert_eq!(d, vec![dec!(50), dec!(30), dec!(20), dec!(10)]);
    assert_eq!(a, vec![dec!(10), dec!(20), dec!(30), dec!(50)]);
}

#[test]
fn test_sort_by_period_absent_last() {
    let t = table();
    for dir in [SortDirection::Ascending, SortDirection::Descending] {
        let sorted = sort_view(&t.view(), SortField::Period, dir);
        assert!(sorted.rows().last().unwrap().competencia.is_none());
    }
    let asc = sort_view(&t.view(), SortField::Period, SortDirection::Ascending);
    let names: Vec<&str> = asc.iter().map(|r| r.vendor.as_str()).collect();
    assert_eq!(names, vec!["Charlie", "Bravo", "Delta", "Alfa"]);
}

#[test]
fn test_sort_by_text_fields() {
    let t = table();
    let by_vendor = sort_view(&t.view(), SortField::Vendor, SortDirection::Ascending);
    let names: Vec<&str> = by_vendor.iter().map(|r| r.vendor.as_str()).collect();
    assert_eq!(names, vec!["Alfa", "Bravo", "Charlie", "Delta"]);

    let by_sector = sort_view(&t.view(), SortField::Sector, SortDirection::Descending);
    let sectors: Vec<&str> = by_sector.iter().map(|r| r.sector.as_str()).collect();
    // stable: the two TI rows keep table order
    assert_eq!(sectors, vec!["TI", "TI", "Limpeza", "Farmácia"]);
    assert_eq!(by_sector.rows()[0].vendor, "Delta");
}

// ── TableSlice ────────────────────────────────────────────────

#[test]
fn test_table_slice_respects_limit() {
    let records: Vec<Record> = (0..120)
        .map(|i| rec("S", "V", Decimal::from(i), None))
        .collect();
    let t = Table::new(records);
    let options = DetailOptions {
        limit: RowLimit::new(100).unwrap(),
        ..DetailOptions::default()
    };
    let slice = TableSlice::build(&t.view(), options);
    assert_eq!(slice.rows.len(), 100);
    assert_eq!(slice.total_rows, 120);
    assert!(slice.is_truncated());
    assert_eq!(slice.rows[0].value, dec!(119));
}

#[test]
fn test_table_slice_carries_parameters() {
    let t = table();
    let options = DetailOptions {
        sort: SortField::Vendor,
        direction: SortDirection::Ascending,
        limit: RowLimit::default(),
    };
    let slice = TableSlice::build(&t.view(), options);
    assert_eq!(slice.sort, SortField::Vendor);
    assert_eq!(slice.direction, SortDirection::Ascending);
    assert!(!slice.is_truncated());
    assert_eq!(vendors(&slice.rows), vec!["Alfa", "Bravo", "Charlie", "Delta"]);
}

// ── Series ────────────────────────────────────────────────────

#[test]
fn test_series_from_concentration() {
    let c = crate::metrics::Concentration {
        head: dec!(90),
        remainder: dec!(10),
    };
    let s = Series::from_concentration("x", c, 5);
    assert_eq!(s.points[0], ("Top 5".to_string(), dec!(90)));
    assert_eq!(s.points[1], ("Others".to_string(), dec!(10)));
}

// ── Dashboard ─────────────────────────────────────────────────

#[test]
fn test_dashboard_full_selection() {
    let t = table();
    let dash = Dashboard::compute(
        &t,
        &FilterSelection::for_table(&t),
        DetailOptions::default(),
        today(),
        30,
    );
    assert_eq!(dash.total_records, 4);
    assert_eq!(dash.shown, 4);
    assert_eq!(dash.total_value, dec!(110));
    assert_eq!(dash.distinct_vendors, 4);
    assert_eq!(dash.distinct_sectors, 3);
    assert_eq!(dash.mean, Some(dec!(27.5)));
    assert_eq!(dash.by_sector.points[0], ("TI".to_string(), dec!(50)));
    let months: Vec<&str> = dash.monthly.points.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
    assert_eq!(dash.quarterly.points.len(), 1);
    assert_eq!(dash.concentration.head, dec!(110));
    assert_eq!(dash.concentration.remainder, Decimal::ZERO);
    assert_eq!(dash.details.rows.len(), 4);
    assert!(!dash.is_empty());
}

#[test]
fn test_dashboard_filtered_to_nothing() {
    let t = table();
    let sel = FilterSelection::for_table(&t).with_search("no such vendor");
    let dash = Dashboard::compute(&t, &sel, DetailOptions::default(), today(), 30);
    assert!(dash.is_empty());
    assert_eq!(dash.total_records, 4);
    assert_eq!(dash.total_value, Decimal::ZERO);
    assert_eq!(dash.mean, None);
    assert!(dash.by_sector.is_empty());
    assert!(dash.distribution.is_empty());
    assert_eq!(dash.alerts.outliers, 0);
    assert_eq!(dash.alerts.expiring, 0);
}

#[test]
fn test_dashboard_concentration_series_totals() {
    let t = table();
    let dash = Dashboard::compute(
        &t,
        &FilterSelection::for_table(&t),
        DetailOptions::default(),
        today(),
        30,
    );
    let s = dash.concentration_series();
    let total: Decimal = s.points.iter().map(|(_, v)| *v).sum();
    assert_eq!(total, dash.total_value);
}
