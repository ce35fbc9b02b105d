use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Field, Granularity, Period, View};

/// Group key → summed value, ordered by the producing function.
pub(crate) type Grouped = Vec<(String, Decimal)>;

pub(crate) fn count(view: &View<'_>) -> usize {
    view.len()
}

pub(crate) fn sum_value(view: &View<'_>) -> Decimal {
    view.iter().map(|r| r.value).sum()
}

/// `None` for an empty view.
pub(crate) fn mean_value(view: &View<'_>) -> Option<Decimal> {
    if view.is_empty() {
        return None;
    }
    Some(sum_value(view) / Decimal::from(view.len()))
}

pub(crate) fn min_value(view: &View<'_>) -> Option<Decimal> {
    view.iter().map(|r| r.value).min()
}

pub(crate) fn max_value(view: &View<'_>) -> Option<Decimal> {
    view.iter().map(|r| r.value).max()
}

/// Number of distinct non-absent values of `field`.
pub(crate) fn distinct_count(view: &View<'_>, field: Field) -> usize {
    view.iter()
        .filter_map(|r| r.label(field))
        .collect::<HashSet<_>>()
        .len()
}

/// Sum of `value` per distinct `field` value, largest first. Equal sums keep
/// the order in which their keys were first seen. Rows with an absent key are
/// skipped.
pub(crate) fn group_sum(view: &View<'_>, field: Field) -> Grouped {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Grouped = Vec::new();
    for r in view {
        let Some(key) = r.label(field) else {
            continue;
        };
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key.to_string(), Decimal::ZERO));
            groups.len() - 1
        });
        groups[slot].1 += r.value;
    }
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}

/// Sum of `value` per calendar period of `competencia`, oldest first.
pub(crate) fn group_sum_by_period(
    view: &View<'_>,
    granularity: Granularity,
) -> Vec<(Period, Decimal)> {
    let mut periods: BTreeMap<Period, Decimal> = BTreeMap::new();
    for r in view {
        if let Some(date) = r.competencia {
            *periods.entry(Period::of(date, granularity)).or_default() += r.value;
        }
    }
    periods.into_iter().collect()
}

/// The `n` highest-sum entries of an already ranked grouping.
pub(crate) fn top_n(grouped: &[(String, Decimal)], n: usize) -> Grouped {
    grouped.iter().take(n).cloned().collect()
}

/// Share of the total held by the top `k` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Concentration {
    pub(crate) head: Decimal,
    pub(crate) remainder: Decimal,
}

impl Concentration {
    pub(crate) fn total(&self) -> Decimal {
        self.head + self.remainder
    }
}

/// Split a ranked grouping into the sum of its first `k` entries and
/// everything else. The remainder is always `total - head`, so with fewer
/// than `k` groups the head is the whole total and the remainder is zero.
pub(crate) fn concentration(grouped: &[(String, Decimal)], k: usize) -> Concentration {
    let total: Decimal = grouped.iter().map(|(_, v)| *v).sum();
    if grouped.len() <= k {
        return Concentration {
            head: total,
            remainder: Decimal::ZERO,
        };
    }
    let head: Decimal = grouped.iter().take(k).map(|(_, v)| *v).sum();
    Concentration {
        head,
        remainder: total - head,
    }
}

/// Linear-interpolation quantile of `value`, `q` in [0, 1]. Errors on an
/// empty view; callers check emptiness first.
pub(crate) fn quantile(view: &View<'_>, q: Decimal) -> Result<Decimal> {
    if q < Decimal::ZERO || q > Decimal::ONE {
        anyhow::bail!("quantile must be within [0, 1], got {q}");
    }
    let mut values: Vec<Decimal> = view.iter().map(|r| r.value).collect();
    if values.is_empty() {
        anyhow::bail!("quantile of an empty view is undefined");
    }
    values.sort_unstable();

    let pos = q * Decimal::from(values.len() - 1);
    let lower = pos.floor();
    let frac = pos - lower;
    let idx = lower
        .to_usize()
        .ok_or_else(|| anyhow::anyhow!("quantile position out of range: {pos}"))?;

    let lo = values[idx];
    match values.get(idx + 1) {
        Some(hi) if !frac.is_zero() => Ok(lo + (*hi - lo) * frac),
        _ => Ok(lo),
    }
}

/// Total, count and mean of `value` for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GroupStats {
    pub(crate) key: String,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    /// Rounded to cents.
    pub(crate) mean: Decimal,
}

/// Per-group total/count/mean, ranked like [`group_sum`].
pub(crate) fn group_stats(view: &View<'_>, field: Field) -> Vec<GroupStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in view.iter().filter_map(|r| r.label(field)) {
        *counts.entry(key).or_default() += 1;
    }
    group_sum(view, field)
        .into_iter()
        .map(|(key, total)| {
            let count = counts.get(key.as_str()).copied().unwrap_or(0);
            let mean = if count == 0 {
                Decimal::ZERO
            } else {
                (total / Decimal::from(count)).round_dp(2)
            };
            GroupStats {
                key,
                total,
                count,
                mean,
            }
        })
        .collect()
}

/// For each `group` value, how many distinct `counted` values appear with
/// it. Largest first, ties in first-seen order.
pub(crate) fn distinct_per_group(view: &View<'_>, group: Field, counted: Field) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashMap<&str, HashSet<&str>> = HashMap::new();
    for r in view {
        let Some(g) = r.label(group) else {
            continue;
        };
        let set = seen.entry(g).or_insert_with(|| {
            order.push(g);
            HashSet::new()
        });
        if let Some(c) = r.label(counted) {
            set.insert(c);
        }
    }
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|g| (g.to_string(), seen.get(g).map_or(0, HashSet::len)))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// One bucket of the value distribution. `upper` is inclusive only for the
/// last bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bin {
    pub(crate) lower: Decimal,
    pub(crate) upper: Decimal,
    pub(crate) count: usize,
}

/// Equal-width histogram of `value` between the view's min and max.
pub(crate) fn histogram(view: &View<'_>, bins: usize) -> Vec<Bin> {
    let (Some(min), Some(max)) = (min_value(view), max_value(view)) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![Bin {
            lower: min,
            upper: max,
            count: view.len(),
        }];
    }

    let width = (max - min) / Decimal::from(bins);
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: min + width * Decimal::from(i),
            upper: if i + 1 == bins {
                max
            } else {
                min + width * Decimal::from(i + 1)
            },
            count: 0,
        })
        .collect();

    for r in view {
        let slot = ((r.value - min) / width)
            .floor()
            .to_usize()
            .unwrap_or(0)
            .min(bins - 1);
        out[slot].count += 1;
    }
    out
}

#[cfg(test)]
mod tests;
