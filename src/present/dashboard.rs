use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Series, TableSlice};
use crate::export::Alerts;
use crate::filter;
use crate::metrics::{self, Bin, Concentration, GroupStats};
use crate::models::{DetailOptions, Field, FilterSelection, Granularity, Table};

pub(crate) const TOP_VENDORS: usize = 10;
pub(crate) const RANKING_ROWS: usize = 20;
pub(crate) const CONCENTRATION_K: usize = 5;
pub(crate) const HISTOGRAM_BINS: usize = 30;

/// Everything one screen refresh needs, computed from scratch for a
/// (table, selection) pair. Owns its data so the caller can keep it
/// alongside the table.
#[derive(Debug, Clone)]
pub(crate) struct Dashboard {
    pub(crate) total_records: usize,
    pub(crate) shown: usize,
    pub(crate) total_value: Decimal,
    pub(crate) distinct_vendors: usize,
    pub(crate) distinct_sectors: usize,
    pub(crate) mean: Option<Decimal>,
    pub(crate) min: Option<Decimal>,
    pub(crate) max: Option<Decimal>,

    // Overview
    pub(crate) by_sector: Series,
    pub(crate) top_vendors: Series,
    pub(crate) distribution: Vec<Bin>,

    // Timeline
    pub(crate) monthly: Series,
    pub(crate) quarterly: Series,

    // Vendors
    pub(crate) vendor_ranking: Vec<GroupStats>,
    pub(crate) concentration: Concentration,
    pub(crate) vendors_per_sector: Vec<(String, usize)>,

    pub(crate) details: TableSlice,
    pub(crate) alerts: Alerts,
}

impl Dashboard {
    pub(crate) fn compute(
        table: &Table,
        selection: &FilterSelection,
        options: DetailOptions,
        today: NaiveDate,
        alert_days: u64,
    ) -> Self {
        let view = filter::apply(table, selection);
        let vendors = metrics::group_sum(&view, Field::Vendor);
        let concentration = metrics::concentration(&vendors, CONCENTRATION_K);
        let mut ranking = metrics::group_stats(&view, Field::Vendor);
        ranking.truncate(RANKING_ROWS);

        tracing::debug!(
            shown = view.len(),
            total = table.len(),
            filters = %selection.describe(),
            "dashboard recomputed"
        );

        Self {
            total_records: table.len(),
            shown: metrics::count(&view),
            total_value: metrics::sum_value(&view),
            distinct_vendors: metrics::distinct_count(&view, Field::Vendor),
            distinct_sectors: metrics::distinct_count(&view, Field::Sector),
            mean: metrics::mean_value(&view),
            min: metrics::min_value(&view),
            max: metrics::max_value(&view),

            by_sector: Series::from_grouped(
                "Value by Sector",
                metrics::group_sum(&view, Field::Sector),
            ),
            top_vendors: Series::from_grouped(
                "Top 10 Vendors",
                metrics::top_n(&vendors, TOP_VENDORS),
            ),
            distribution: metrics::histogram(&view, HISTOGRAM_BINS),

            monthly: Series::from_periods(
                "Monthly Evolution",
                metrics::group_sum_by_period(&view, Granularity::Month),
            ),
            quarterly: Series::from_periods(
                "Quarterly Totals",
                metrics::group_sum_by_period(&view, Granularity::Quarter),
            ),

            vendor_ranking: ranking,
            concentration,
            vendors_per_sector: metrics::distinct_per_group(&view, Field::Sector, Field::Vendor),

            details: TableSlice::build(&view, options),
            alerts: Alerts::compute(&view, today, alert_days),
        }
    }

    pub(crate) fn concentration_series(&self) -> Series {
        Series::from_concentration("Top 5 vs Others", self.concentration, CONCENTRATION_K)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.shown == 0
    }
}
