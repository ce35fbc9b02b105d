use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::import::parse_value;
use crate::models::{RowLimit, SortDirection, SortField};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("timeline", "Go to Timeline", cmd_timeline, r);
    register_command!("vendors", "Go to Vendors", cmd_vendors, r);
    register_command!("details", "Go to Details", cmd_details, r);
    register_command!(
        "sector",
        "Filter by sector (e.g. :sector UTI, :sector all)",
        cmd_sector,
        r
    );
    register_command!(
        "vendor",
        "Filter by vendor (e.g. :vendor Acme, :vendor all)",
        cmd_vendor,
        r
    );
    register_command!(
        "year",
        "Filter by competencia year (e.g. :year 2025)",
        cmd_year,
        r
    );
    register_command!(
        "month",
        "Filter by competencia month (e.g. :month 3)",
        cmd_month,
        r
    );
    register_command!(
        "min",
        "Minimum value (e.g. :min 1000, empty resets)",
        cmd_min,
        r
    );
    register_command!(
        "max",
        "Maximum value (e.g. :max 50000, empty resets)",
        cmd_max,
        r
    );
    register_command!(
        "search",
        "Search vendor or contract (e.g. :search acme)",
        cmd_search,
        r
    );
    register_command!("s", "Search vendor or contract", cmd_search, r);
    register_command!(
        "sort",
        "Sort details by value, period, vendor or sector",
        cmd_sort,
        r
    );
    register_command!(
        "order",
        "Sort direction asc|desc (empty toggles)",
        cmd_order,
        r
    );
    register_command!(
        "rows",
        "Rows in details: 50, 100, 200 or 500 (empty cycles)",
        cmd_rows,
        r
    );
    register_command!(
        "export",
        "Export filtered records to CSV (e.g. :export ~/reports)",
        cmd_export,
        r
    );
    register_command!("e", "Export filtered records to CSV", cmd_export, r);
    register_command!("reset", "Clear all filters", cmd_reset, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Argument parsing ─────────────────────────────────────────

fn is_all(args: &str) -> bool {
    args.is_empty() || args.eq_ignore_ascii_case("all")
}

/// Resolve `args` against the known `options`, case-insensitively. `all` or
/// an empty argument yields `None`.
pub(crate) fn parse_choice(args: &str, options: &[String], what: &str) -> anyhow::Result<Option<String>> {
    if is_all(args) {
        return Ok(None);
    }
    let needle = args.to_lowercase();
    options
        .iter()
        .find(|o| o.to_lowercase() == needle)
        .cloned()
        .map(Some)
        .ok_or_else(|| anyhow::anyhow!("Unknown {what}: {args}"))
}

pub(crate) fn parse_year(args: &str) -> anyhow::Result<Option<i32>> {
    if is_all(args) {
        return Ok(None);
    }
    args.parse()
        .map(Some)
        .map_err(|_| anyhow::anyhow!("Invalid year: {args}"))
}

pub(crate) fn parse_month(args: &str) -> anyhow::Result<Option<u32>> {
    if is_all(args) {
        return Ok(None);
    }
    match args.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) => Ok(Some(m)),
        _ => anyhow::bail!("Invalid month: {args} (expected 1-12)"),
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Overview;
    Ok(())
}

fn cmd_timeline(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Timeline;
    Ok(())
}

fn cmd_vendors(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Vendors;
    Ok(())
}

fn cmd_details(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Details;
    Ok(())
}

fn cmd_sector(args: &str, app: &mut App) -> anyhow::Result<()> {
    let sector = parse_choice(args, &app.sectors, "sector")?;
    app.set_status(format!("Sector: {}", sector.as_deref().unwrap_or("all")));
    app.set_selection(app.selection.clone().with_sector(sector));
    Ok(())
}

fn cmd_vendor(args: &str, app: &mut App) -> anyhow::Result<()> {
    let vendor = parse_choice(args, &app.vendors, "vendor")?;
    app.set_status(format!("Vendor: {}", vendor.as_deref().unwrap_or("all")));
    app.set_selection(app.selection.clone().with_vendor(vendor));
    Ok(())
}

fn cmd_year(args: &str, app: &mut App) -> anyhow::Result<()> {
    let year = parse_year(args)?;
    app.set_status(format!(
        "Year: {}",
        year.map_or_else(|| "all".to_string(), |y| y.to_string())
    ));
    app.set_selection(app.selection.clone().with_year(year));
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    let month = parse_month(args)?;
    app.set_status(format!(
        "Month: {}",
        month.map_or_else(|| "all".to_string(), |m| m.to_string())
    ));
    app.set_selection(app.selection.clone().with_month(month));
    Ok(())
}

fn cmd_min(args: &str, app: &mut App) -> anyhow::Result<()> {
    let min = if args.is_empty() {
        app.table.value_bounds().map_or(rust_decimal::Decimal::ZERO, |(lo, _)| lo)
    } else {
        parse_value(args)?
    };
    app.set_status(format!("Minimum value: {min}"));
    app.set_selection(app.selection.clone().with_min(min));
    Ok(())
}

fn cmd_max(args: &str, app: &mut App) -> anyhow::Result<()> {
    let max = if args.is_empty() {
        app.table.value_bounds().map_or(rust_decimal::Decimal::ZERO, |(_, hi)| hi)
    } else {
        parse_value(args)?
    };
    app.set_status(format!("Maximum value: {max}"));
    app.set_selection(app.selection.clone().with_max(max));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Search: {args}"));
    }
    app.set_selection(app.selection.clone().with_search(args));
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(sort) = SortField::parse(args) else {
        let fields: Vec<&str> = SortField::all().iter().map(|f| f.as_str()).collect();
        anyhow::bail!("Usage: :sort <field>. Fields: {}", fields.join(", "));
    };
    app.set_status(format!("Sorted by {sort}"));
    app.set_options(crate::models::DetailOptions { sort, ..app.options });
    Ok(())
}

fn cmd_order(args: &str, app: &mut App) -> anyhow::Result<()> {
    let direction = if args.is_empty() {
        app.options.direction.toggled()
    } else {
        SortDirection::parse(args)
            .ok_or_else(|| anyhow::anyhow!("Usage: :order asc|desc"))?
    };
    app.set_status(format!("Order: {direction}"));
    app.set_options(crate::models::DetailOptions {
        direction,
        ..app.options
    });
    Ok(())
}

fn cmd_rows(args: &str, app: &mut App) -> anyhow::Result<()> {
    let limit = if args.is_empty() {
        app.options.limit.next()
    } else {
        args.parse()
            .ok()
            .and_then(RowLimit::new)
            .ok_or_else(|| anyhow::anyhow!("Rows must be one of 50, 100, 200, 500"))?
    };
    app.set_status(format!("Showing up to {} rows", limit.get()));
    app.set_options(crate::models::DetailOptions { limit, ..app.options });
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let dir = if args.is_empty() {
        None
    } else {
        Some(crate::run::shellexpand(args))
    };
    let path = app.export(dir.as_deref().map(Path::new))?;
    app.set_status(format!("Exported to {}", path.display()));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.reset_filters();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
