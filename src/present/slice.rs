use std::cmp::Ordering;

use crate::models::{DetailOptions, Record, RowLimit, SortDirection, SortField, View};

/// Reorder a view by `field`. The sort is stable; records without a
/// competencia always go last when sorting by period.
pub(crate) fn sort_view<'a>(view: &View<'a>, field: SortField, direction: SortDirection) -> View<'a> {
    let directed = |ord: Ordering| match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    };

    let mut rows = view.rows().to_vec();
    rows.sort_by(|a, b| match field {
        SortField::Value => directed(a.value.cmp(&b.value)),
        SortField::Vendor => directed(a.vendor.cmp(&b.vendor)),
        SortField::Sector => directed(a.sector.cmp(&b.sector)),
        SortField::Period => match (a.competencia, b.competencia) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    });
    View::new(rows)
}

/// The details table: sorted, truncated to the row limit, with the
/// parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TableSlice {
    pub(crate) sort: SortField,
    pub(crate) direction: SortDirection,
    pub(crate) limit: RowLimit,
    /// Rows in the view before truncation.
    pub(crate) total_rows: usize,
    pub(crate) rows: Vec<Record>,
}

impl TableSlice {
    pub(crate) fn build(view: &View<'_>, options: DetailOptions) -> Self {
        let sorted = sort_view(view, options.sort, options.direction);
        Self {
            sort: options.sort,
            direction: options.direction,
            limit: options.limit,
            total_rows: view.len(),
            rows: sorted
                .iter()
                .take(options.limit.get())
                .cloned()
                .collect(),
        }
    }

    pub(crate) fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}
