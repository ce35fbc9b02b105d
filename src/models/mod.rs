mod options;
mod record;
mod selection;

pub use options::{DetailOptions, Granularity, Period, RowLimit, SortDirection, SortField};
pub use record::{Field, Record, Table, View};
pub use selection::FilterSelection;
