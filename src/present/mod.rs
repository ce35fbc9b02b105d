//! Chart- and table-ready payloads derived from a filtered view.

mod dashboard;
mod series;
mod slice;

pub(crate) use dashboard::{Dashboard, CONCENTRATION_K};
pub(crate) use series::Series;
pub(crate) use slice::TableSlice;

#[cfg(test)]
mod tests;
