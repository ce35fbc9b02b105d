use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::export;
use crate::filter;
use crate::models::{DetailOptions, FilterSelection, Table};
use crate::present::Dashboard;
use crate::ui::util::cycle_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Timeline,
    Vendors,
    Details,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Overview, Self::Timeline, Self::Vendors, Self::Details]
    }

    pub(crate) fn next(self) -> Self {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + 1) % screens.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + screens.len() - 1) % screens.len()]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Timeline => write!(f, "Timeline"),
            Self::Vendors => write!(f, "Vendors"),
            Self::Details => write!(f, "Details"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Data
    pub(crate) table: Table,
    pub(crate) selection: FilterSelection,
    pub(crate) options: DetailOptions,
    pub(crate) dashboard: Dashboard,
    pub(crate) today: NaiveDate,
    pub(crate) alert_days: u64,
    pub(crate) export_dir: PathBuf,

    // Picker options, fixed for the session
    pub(crate) sectors: Vec<String>,
    pub(crate) vendors: Vec<String>,
    pub(crate) years: Vec<i32>,
    pub(crate) months: Vec<u32>,

    // Details table
    pub(crate) detail_index: usize,
    pub(crate) detail_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(table: Table, config: &Config) -> Self {
        let today = Local::now().date_naive();
        let selection = FilterSelection::for_table(&table);
        let options = DetailOptions::default();
        let dashboard = Dashboard::compute(&table, &selection, options, today, config.alert_days);

        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            sectors: table.sectors(),
            vendors: table.vendors(),
            years: table.years(),
            months: table.months(),

            table,
            selection,
            options,
            dashboard,
            today,
            alert_days: config.alert_days,
            export_dir: config.export_dir.clone(),

            detail_index: 0,
            detail_scroll: 0,

            visible_rows: 20,
        }
    }

    /// Recompute every aggregate for the current selection and options.
    pub(crate) fn refresh(&mut self) {
        self.dashboard = Dashboard::compute(
            &self.table,
            &self.selection,
            self.options,
            self.today,
            self.alert_days,
        );
        let rows = self.dashboard.details.rows.len();
        if self.detail_index >= rows {
            self.detail_index = rows.saturating_sub(1);
        }
        if self.detail_scroll > self.detail_index {
            self.detail_scroll = self.detail_index;
        }
    }

    /// Replace the current selection wholesale and recompute.
    pub(crate) fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.detail_index = 0;
        self.detail_scroll = 0;
        self.refresh();
    }

    pub(crate) fn set_options(&mut self, options: DetailOptions) {
        self.options = options;
        self.detail_index = 0;
        self.detail_scroll = 0;
        self.refresh();
    }

    pub(crate) fn reset_filters(&mut self) {
        self.search_input.clear();
        self.set_selection(FilterSelection::for_table(&self.table));
        self.set_status("Filters cleared");
    }

    pub(crate) fn cycle_sector(&mut self, forward: bool) {
        let next = cycle_option(&self.sectors, self.selection.sector.as_ref(), forward);
        self.set_status(format!("Sector: {}", next.as_deref().unwrap_or("all")));
        self.set_selection(self.selection.clone().with_sector(next));
    }

    pub(crate) fn cycle_vendor(&mut self, forward: bool) {
        let next = cycle_option(&self.vendors, self.selection.vendor.as_ref(), forward);
        self.set_status(format!("Vendor: {}", next.as_deref().unwrap_or("all")));
        self.set_selection(self.selection.clone().with_vendor(next));
    }

    pub(crate) fn cycle_year(&mut self, forward: bool) {
        let next = cycle_option(&self.years, self.selection.year.as_ref(), forward);
        self.set_status(format!("Year: {}", label_or_all(next)));
        self.set_selection(self.selection.clone().with_year(next));
    }

    pub(crate) fn cycle_month(&mut self, forward: bool) {
        let next = cycle_option(&self.months, self.selection.month.as_ref(), forward);
        self.set_status(format!("Month: {}", label_or_all(next)));
        self.set_selection(self.selection.clone().with_month(next));
    }

    /// Write the current filtered view to a timestamped CSV in `dir`, or in
    /// the configured export directory.
    pub(crate) fn export(&self, dir: Option<&Path>) -> Result<PathBuf> {
        let dir = dir.unwrap_or(self.export_dir.as_path());
        let view = filter::apply(&self.table, &self.selection);
        if view.is_empty() {
            anyhow::bail!("Nothing to export: no records match the current filters");
        }
        export::write_export(&view, dir, Local::now().naive_local())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn label_or_all<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "all".to_string(), |v| v.to_string())
}
