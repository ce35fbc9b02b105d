use crate::models::{FilterSelection, Record, View};

/// Narrow `rows` to the records matching every active predicate of
/// `selection`. Source order is preserved and nothing here can fail:
/// absent fields simply do not match.
pub(crate) fn apply<'a, I>(rows: I, selection: &FilterSelection) -> View<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = selection.search.to_lowercase();
    View::new(
        rows.into_iter()
            .filter(|r| matches(r, selection, &needle))
            .collect(),
    )
}

/// `needle` is the lowercased search term.
fn matches(record: &Record, selection: &FilterSelection, needle: &str) -> bool {
    if let Some(sector) = &selection.sector {
        if record.sector != *sector {
            return false;
        }
    }
    if let Some(vendor) = &selection.vendor {
        if record.vendor != *vendor {
            return false;
        }
    }
    if let Some(year) = selection.year {
        if record.year() != Some(year) {
            return false;
        }
    }
    if let Some(month) = selection.month {
        if record.month() != Some(month) {
            return false;
        }
    }

    let (min, max) = selection.value_range;
    if record.value < min || record.value > max {
        return false;
    }

    needle.is_empty() || matches_search(record, needle)
}

fn matches_search(record: &Record, needle: &str) -> bool {
    let contains = |field: Option<&str>| field.is_some_and(|s| s.to_lowercase().contains(needle));
    contains(Some(record.vendor.as_str())) || contains(record.contract.as_deref())
}
