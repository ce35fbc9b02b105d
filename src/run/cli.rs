use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::config::{flag_value, Config};
use crate::export::{self, Alerts};
use crate::filter;
use crate::import::parse_value;
use crate::metrics;
use crate::models::{Field, FilterSelection, Table};
use crate::ui::commands::{parse_choice, parse_month, parse_year};
use crate::ui::util::{format_amount, format_count, format_optional_amount};

const FILTER_FLAGS: &[&str] = &[
    "--sector", "--vendor", "--year", "--month", "--min", "--max", "--search",
];

const DEFAULT_TOP_N: usize = 10;

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("empenhos {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, &super::load_table(config)?, config),
        "export" => cli_export(rest, &super::load_table(config)?, config),
        "alerts" => cli_alerts(rest, &super::load_table(config)?, config),
        "top" => cli_top(rest, &super::load_table(config)?),
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("empenhos: hospital procurement commitments dashboard");
    println!();
    println!("Usage: empenhos [--data <file.csv>] [command] [filters]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print totals, sector breakdown and alerts");
    println!("  export [dir]                  Write filtered records to a timestamped CSV");
    println!("  alerts                        List expiring contracts and high-value outliers");
    println!("    --days <N>                  Expiry window in days (default: 30)");
    println!("  top                           Rank vendors or sectors by total value");
    println!("    --by <vendor|sector>        Grouping (default: vendor)");
    println!("    --n <N>                     Number of rows (default: 10)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Filters (any command):");
    println!("  --sector <name>  --vendor <name>  --year <YYYY>  --month <1-12>");
    println!("  --min <value>    --max <value>    --search <text>");
    println!();
    println!("Environment: EMPENHOS_DATA, EMPENHOS_EXPORT_DIR, EMPENHOS_ALERT_DAYS, RUST_LOG");
}

/// Build a selection from the filter flags in `args`, starting from the
/// identity selection for `table`.
pub(crate) fn parse_selection(args: &[String], table: &Table) -> Result<FilterSelection> {
    let mut selection = FilterSelection::for_table(table);

    if let Some(s) = flag_value(args, "--sector") {
        selection = selection.with_sector(parse_choice(s, &table.sectors(), "sector")?);
    }
    if let Some(v) = flag_value(args, "--vendor") {
        selection = selection.with_vendor(parse_choice(v, &table.vendors(), "vendor")?);
    }
    if let Some(y) = flag_value(args, "--year") {
        selection = selection.with_year(parse_year(y)?);
    }
    if let Some(m) = flag_value(args, "--month") {
        selection = selection.with_month(parse_month(m)?);
    }
    if let Some(min) = flag_value(args, "--min") {
        selection = selection.with_min(parse_value(min).context("Invalid --min")?);
    }
    if let Some(max) = flag_value(args, "--max") {
        selection = selection.with_max(parse_value(max).context("Invalid --max")?);
    }
    if let Some(q) = flag_value(args, "--search") {
        selection = selection.with_search(q);
    }
    Ok(selection)
}

/// Fail on `--flags` this command doesn't understand.
fn reject_unknown_flags(args: &[String], extra: &[&str]) -> Result<()> {
    let unknown: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| a.starts_with("--"))
        .filter(|a| !FILTER_FLAGS.contains(a) && !extra.contains(a))
        .collect();
    if !unknown.is_empty() {
        anyhow::bail!("Unknown option(s): {}", unknown.join(", "));
    }
    Ok(())
}

fn parse_count(args: &[String], flag: &str, default: usize) -> Result<usize> {
    flag_value(args, flag).map_or(Ok(default), |raw| {
        raw.parse()
            .with_context(|| format!("{flag} expects a whole number, got '{raw}'"))
    })
}

fn cli_summary(args: &[String], table: &Table, config: &Config) -> Result<()> {
    reject_unknown_flags(args, &[])?;
    let selection = parse_selection(args, table)?;
    let view = filter::apply(table, &selection);

    println!("Empenhos ({})", selection.describe());
    println!("{}", "─".repeat(48));
    println!("  Total committed: {}", format_amount(metrics::sum_value(&view)));
    println!(
        "  Records:         {} of {}",
        format_count(view.len()),
        format_count(table.len())
    );
    println!(
        "  Vendors:         {}",
        format_count(metrics::distinct_count(&view, Field::Vendor))
    );
    println!(
        "  Sectors:         {}",
        format_count(metrics::distinct_count(&view, Field::Sector))
    );
    println!("  Mean:            {}", format_optional_amount(metrics::mean_value(&view)));
    println!("  Max:             {}", format_optional_amount(metrics::max_value(&view)));
    println!("  Min:             {}", format_optional_amount(metrics::min_value(&view)));

    let by_sector = metrics::group_sum(&view, Field::Sector);
    if !by_sector.is_empty() {
        println!();
        println!("Value by Sector:");
        for (sector, total) in &by_sector {
            println!("  {sector:<32} {:>20}", format_amount(*total));
        }
    }

    let today = Local::now().date_naive();
    let alerts = Alerts::compute(&view, today, config.alert_days);
    let messages = alerts.messages();
    if !messages.is_empty() {
        println!();
        for m in &messages {
            println!("! {m}");
        }
    }
    Ok(())
}

fn cli_export(args: &[String], table: &Table, config: &Config) -> Result<()> {
    reject_unknown_flags(args, &[])?;
    let selection = parse_selection(args, table)?;
    let view = filter::apply(table, &selection);

    // Output directory is the first non-flag argument
    let dir = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(super::shellexpand(a)))
        .unwrap_or_else(|| config.export_dir.clone());

    if view.is_empty() {
        println!("No records match the given filters; nothing exported");
        return Ok(());
    }

    let path = export::write_export(&view, &dir, Local::now().naive_local())?;
    println!(
        "Exported {} records to {}",
        format_count(view.len()),
        path.display()
    );
    Ok(())
}

fn cli_alerts(args: &[String], table: &Table, config: &Config) -> Result<()> {
    reject_unknown_flags(args, &["--days"])?;
    let selection = parse_selection(args, table)?;
    let days = parse_count(args, "--days", config.alert_days as usize)? as u64;
    let view = filter::apply(table, &selection);
    let today = Local::now().date_naive();

    let expiring = export::expiring_contracts(&view, today, days);
    println!("Contracts expiring within {days} days of {today}:");
    if expiring.is_empty() {
        println!("  none");
    }
    for r in &expiring {
        println!(
            "  {:<12} {:<32} {:<16} {:>18}",
            r.contract_expiration
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            r.vendor,
            r.contract.as_deref().unwrap_or("-"),
            format_amount(r.value)
        );
    }

    let outliers = export::high_value_outliers(&view);
    println!();
    println!("Commitments above the 95th percentile:");
    if outliers.is_empty() {
        println!("  none");
    }
    for r in &outliers {
        println!(
            "  {:<24} {:<32} {:>18}",
            r.sector,
            r.vendor,
            format_amount(r.value)
        );
    }
    Ok(())
}

fn cli_top(args: &[String], table: &Table) -> Result<()> {
    reject_unknown_flags(args, &["--by", "--n"])?;
    let selection = parse_selection(args, table)?;
    let by = match flag_value(args, "--by") {
        Some(raw) => match Field::parse(raw) {
            Some(f @ (Field::Vendor | Field::Sector)) => f,
            _ => anyhow::bail!("--by expects 'vendor' or 'sector', got '{raw}'"),
        },
        None => Field::Vendor,
    };
    let n = parse_count(args, "--n", DEFAULT_TOP_N)?;
    let view = filter::apply(table, &selection);

    let grouped = metrics::group_sum(&view, by);
    let concentration = metrics::concentration(&grouped, n);
    let mut stats = metrics::group_stats(&view, by);
    stats.truncate(n);

    println!(
        "{:<4} {:<36} {:>20} {:>8} {:>18}",
        "#",
        by.as_str(),
        "Total",
        "Records",
        "Mean"
    );
    println!("{}", "─".repeat(90));
    for (i, s) in stats.iter().enumerate() {
        println!(
            "{:<4} {:<36} {:>20} {:>8} {:>18}",
            i + 1,
            s.key,
            format_amount(s.total),
            s.count,
            format_amount(s.mean)
        );
    }
    println!();
    println!(
        "Top {n}: {}   Others: {}",
        format_amount(concentration.head),
        format_amount(concentration.remainder)
    );
    Ok(())
}
