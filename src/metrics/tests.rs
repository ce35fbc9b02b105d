#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::filter;
use crate::models::{FilterSelection, Record, Table};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn rec(sector: &str, vendor: &str, value: Decimal, comp: Option<NaiveDate>) -> Record {
    let mut r = Record::new(sector, vendor, value);
    r.competencia = comp;
    r
}

fn example_table() -> Table {
    Table::new(vec![
        rec("Farmácia", "A", dec!(100), date(2025, 1, 15)),
        rec("Farmácia", "B", dec!(200), date(2025, 2, 10)),
        rec("TI", "A", dec!(50), date(2025, 1, 20)),
    ])
}

fn wide_table() -> Table {
    Table::new(vec![
        rec("TI", "V1", dec!(10), date(2025, 1, 5)),
        rec("TI", "V2", dec!(40), date(2025, 4, 5)),
        rec("Farmácia", "V3", dec!(30), date(2025, 3, 5)),
        rec("Farmácia", "V4", dec!(20), date(2024, 11, 5)),
        rec("Limpeza", "V5", dec!(60), None),
        rec("Limpeza", "V6", dec!(5), date(2025, 7, 1)),
        rec("TI", "V7", dec!(15), date(2025, 1, 25)),
        rec("TI", "V1", dec!(25), date(2025, 2, 2)),
    ])
}

// ── Basic metrics ─────────────────────────────────────────────

#[test]
fn test_farmacia_sector_view() {
    let table = example_table();
    let sel = FilterSelection::for_table(&table).with_sector(Some("Farmácia".into()));
    let view = filter::apply(&table, &sel);
    assert_eq!(count(&view), 2);
    assert_eq!(sum_value(&view), dec!(300));
    assert_eq!(
        group_sum(&view, Field::Vendor),
        vec![("B".to_string(), dec!(200)), ("A".to_string(), dec!(100))]
    );
}

#[test]
fn test_empty_view_metrics() {
    let table = Table::default();
    let view = table.view();
    assert_eq!(count(&view), 0);
    assert_eq!(sum_value(&view), Decimal::ZERO);
    assert_eq!(mean_value(&view), None);
    assert_eq!(min_value(&view), None);
    assert_eq!(max_value(&view), None);
    assert_eq!(distinct_count(&view, Field::Vendor), 0);
    assert!(group_sum(&view, Field::Sector).is_empty());
}

#[test]
fn test_mean_min_max() {
    let table = example_table();
    let view = table.view();
    assert_eq!(mean_value(&view).unwrap().round_dp(2), dec!(116.67));
    assert_eq!(min_value(&view), Some(dec!(50)));
    assert_eq!(max_value(&view), Some(dec!(200)));
}

#[test]
fn test_distinct_count_skips_absent() {
    let mut t = example_table().records().to_vec();
    t[0].contract = Some("C1".into());
    t[1].contract = Some("C1".into());
    let table = Table::new(t);
    let view = table.view();
    assert_eq!(distinct_count(&view, Field::Vendor), 2);
    assert_eq!(distinct_count(&view, Field::Sector), 2);
    assert_eq!(distinct_count(&view, Field::Contract), 1);
    assert_eq!(distinct_count(&view, Field::Item), 0);
}

// ── Grouping ──────────────────────────────────────────────────

#[test]
fn test_group_sum_matches_total() {
    let table = wide_table();
    let view = table.view();
    for field in [Field::Sector, Field::Vendor] {
        let total: Decimal = group_sum(&view, field).iter().map(|(_, v)| *v).sum();
        assert_eq!(total, sum_value(&view));
    }
}

#[test]
fn test_group_sum_ties_keep_first_seen_order() {
    let table = Table::new(vec![
        rec("X", "Late", dec!(10), None),
        rec("X", "Big", dec!(50), None),
        rec("X", "Early", dec!(10), None),
    ]);
    let grouped = group_sum(&table.view(), Field::Vendor);
    let keys: Vec<&str> = grouped.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["Big", "Late", "Early"]);
}

#[test]
fn test_group_sum_by_month_is_chronological() {
    let table = wide_table();
    let series = group_sum_by_period(&table.view(), Granularity::Month);
    let labels: Vec<String> = series.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(
        labels,
        vec!["2024-11", "2025-01", "2025-02", "2025-03", "2025-04", "2025-07"]
    );
    assert_eq!(series[1].1, dec!(25));
}

#[test]
fn test_group_sum_by_quarter_skips_absent() {
    let table = wide_table();
    let series = group_sum_by_period(&table.view(), Granularity::Quarter);
    let labels: Vec<String> = series.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(labels, vec!["2024Q4", "2025Q1", "2025Q2", "2025Q3"]);
    let total: Decimal = series.iter().map(|(_, v)| *v).sum();
    // V5 (60) has no competencia
    assert_eq!(total, sum_value(&table.view()) - dec!(60));
    assert_eq!(series[1].1, dec!(80));
}

#[test]
fn test_top_n() {
    let table = wide_table();
    let grouped = group_sum(&table.view(), Field::Vendor);
    let top = top_n(&grouped, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0], ("V5".to_string(), dec!(60)));
    assert_eq!(top[1].1, dec!(40));
    assert_eq!(top_n(&grouped, 100).len(), grouped.len());
}

// ── Concentration ─────────────────────────────────────────────

#[test]
fn test_concentration_top5_plus_rest_is_total() {
    let table = wide_table();
    let view = table.view();
    let grouped = group_sum(&view, Field::Vendor);
    assert_eq!(grouped.len(), 7);
    let c = concentration(&grouped, 5);
    assert_eq!(c.head + c.remainder, sum_value(&view));
    assert_eq!(c.head, dec!(60) + dec!(40) + dec!(35) + dec!(30) + dec!(20));
    assert_eq!(c.remainder, dec!(15) + dec!(5));
}

#[test]
fn test_concentration_fewer_groups_than_k() {
    let table = example_table();
    let view = table.view();
    let grouped = group_sum(&view, Field::Vendor);
    let c = concentration(&grouped, 5);
    assert_eq!(c.head, sum_value(&view));
    assert_eq!(c.remainder, Decimal::ZERO);
    assert_eq!(c.total(), sum_value(&view));
}

#[test]
fn test_concentration_exactly_k_groups() {
    let grouped = vec![("a".to_string(), dec!(3)), ("b".to_string(), dec!(2))];
    let c = concentration(&grouped, 2);
    assert_eq!(c.head, dec!(5));
    assert_eq!(c.remainder, Decimal::ZERO);
}

#[test]
fn test_concentration_empty() {
    let c = concentration(&[], 5);
    assert_eq!(c.head, Decimal::ZERO);
    assert_eq!(c.remainder, Decimal::ZERO);
}

// ── Quantile ──────────────────────────────────────────────────

fn values_table(values: &[Decimal]) -> Table {
    Table::new(values.iter().map(|v| rec("S", "V", *v, None)).collect())
}

#[test]
fn test_quantile_interpolates() {
    let table = values_table(&[dec!(1), dec!(2), dec!(3), dec!(4)]);
    let view = table.view();
    assert_eq!(quantile(&view, dec!(0)).unwrap(), dec!(1));
    assert_eq!(quantile(&view, dec!(1)).unwrap(), dec!(4));
    assert_eq!(quantile(&view, dec!(0.5)).unwrap(), dec!(2.5));
    // pos = 0.95 * 3 = 2.85 -> 3 + 0.85
    assert_eq!(quantile(&view, dec!(0.95)).unwrap(), dec!(3.85));
}

#[test]
fn test_quantile_unsorted_input() {
    let table = values_table(&[dec!(40), dec!(10), dec!(30), dec!(20)]);
    assert_eq!(quantile(&table.view(), dec!(0.5)).unwrap(), dec!(25));
}

#[test]
fn test_quantile_single_value() {
    let table = values_table(&[dec!(7)]);
    assert_eq!(quantile(&table.view(), dec!(0.95)).unwrap(), dec!(7));
}

#[test]
fn test_quantile_empty_is_error() {
    let table = Table::default();
    assert!(quantile(&table.view(), dec!(0.5)).is_err());
}

#[test]
fn test_quantile_out_of_range_is_error() {
    let table = values_table(&[dec!(1)]);
    assert!(quantile(&table.view(), dec!(1.5)).is_err());
    assert!(quantile(&table.view(), dec!(-0.1)).is_err());
}

// ── Group stats ───────────────────────────────────────────────

#[test]
fn test_group_stats_vendor_ranking() {
    let table = wide_table();
    let stats = group_stats(&table.view(), Field::Vendor);
    assert_eq!(stats[0].key, "V5");
    let v1 = stats.iter().find(|s| s.key == "V1").unwrap();
    assert_eq!(v1.total, dec!(35));
    assert_eq!(v1.count, 2);
    assert_eq!(v1.mean, dec!(17.50));
}

#[test]
fn test_group_stats_mean_rounded() {
    let table = Table::new(vec![
        rec("S", "V", dec!(10), None),
        rec("S", "V", dec!(10), None),
        rec("S", "V", dec!(0.01), None),
    ]);
    let stats = group_stats(&table.view(), Field::Vendor);
    assert_eq!(stats[0].mean, dec!(6.67));
}

#[test]
fn test_distinct_per_group_vendors_per_sector() {
    let table = wide_table();
    let counts = distinct_per_group(&table.view(), Field::Sector, Field::Vendor);
    assert_eq!(
        counts,
        vec![
            ("TI".to_string(), 3),
            ("Farmácia".to_string(), 2),
            ("Limpeza".to_string(), 2),
        ]
    );
}

// ── Histogram ─────────────────────────────────────────────────

#[test]
fn test_histogram_counts_everything() {
    let table = wide_table();
    let bins = histogram(&table.view(), 5);
    assert_eq!(bins.len(), 5);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), table.len());
    assert_eq!(bins[0].lower, dec!(5));
    assert_eq!(bins[4].upper, dec!(60));
}

#[test]
fn test_histogram_max_lands_in_last_bin() {
    let table = values_table(&[dec!(0), dec!(10)]);
    let bins = histogram(&table.view(), 2);
    assert_eq!(bins[0].count, 1);
    assert_eq!(bins[1].count, 1);
}

#[test]
fn test_histogram_constant_values() {
    let table = values_table(&[dec!(3), dec!(3)]);
    let bins = histogram(&table.view(), 30);
    assert_eq!(bins.len(), 1);
    assert_eq!(bins[0].count, 2);
}

#[test]
fn test_histogram_empty() {
    let table = Table::default();
    assert!(histogram(&table.view(), 30).is_empty());
}
