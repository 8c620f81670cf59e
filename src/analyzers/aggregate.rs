//! Grouping primitives behind every chart, metric and table.
//!
//! Every grouped result is ordered by its metric (descending unless stated
//! otherwise) with ties broken by ascending key, so repeated calls over the
//! same records always produce identical output.

use crate::analyzers::types::{GroupCount, GroupMean};
use crate::analyzers::utility::mean;
use crate::normalize::NormalizedRecord;
use std::collections::{BTreeMap, BTreeSet};

fn group_counts<K, F>(records: &[&NormalizedRecord], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&NormalizedRecord) -> K,
{
    let mut groups: BTreeMap<K, usize> = BTreeMap::new();
    for &record in records {
        *groups.entry(key(record)).or_default() += 1;
    }
    groups
}

/// Number of records in each group.
pub fn count_by<K, F>(records: &[&NormalizedRecord], key: F) -> Vec<GroupCount<K>>
where
    K: Ord,
    F: Fn(&NormalizedRecord) -> K,
{
    rank_counts(group_counts(records, key))
}

/// Number of records in each group, smallest first.
pub fn lowest_count_by<K, F>(records: &[&NormalizedRecord], key: F) -> Vec<GroupCount<K>>
where
    K: Ord,
    F: Fn(&NormalizedRecord) -> K,
{
    let mut rows: Vec<_> = group_counts(records, key)
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    rows.sort_by_key(|row| row.count);
    rows
}

/// Number of distinct `value`s in each group.
pub fn count_distinct_by<K, V, F, G>(
    records: &[&NormalizedRecord],
    key: F,
    value: G,
) -> Vec<GroupCount<K>>
where
    K: Ord,
    V: Ord,
    F: Fn(&NormalizedRecord) -> K,
    G: Fn(&NormalizedRecord) -> V,
{
    let mut groups: BTreeMap<K, BTreeSet<V>> = BTreeMap::new();
    for &record in records {
        groups.entry(key(record)).or_default().insert(value(record));
    }

    rank_counts(groups.into_iter().map(|(k, values)| (k, values.len())))
}

fn rank_counts<K: Ord>(groups: impl IntoIterator<Item = (K, usize)>) -> Vec<GroupCount<K>> {
    // Groups arrive in ascending key order and the sort is stable.
    let mut rows: Vec<_> = groups
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

fn group_means<K, F, G>(records: &[&NormalizedRecord], key: F, value: G) -> Vec<GroupMean<K>>
where
    K: Ord,
    F: Fn(&NormalizedRecord) -> K,
    G: Fn(&NormalizedRecord) -> f64,
{
    let mut series: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for &record in records {
        series.entry(key(record)).or_default().push(value(record));
    }

    series
        .into_iter()
        .map(|(key, values)| GroupMean {
            key,
            mean: mean(&values),
        })
        .collect()
}

/// Mean of `value` per group, highest first.
pub fn mean_by<K, F, G>(records: &[&NormalizedRecord], key: F, value: G) -> Vec<GroupMean<K>>
where
    K: Ord,
    F: Fn(&NormalizedRecord) -> K,
    G: Fn(&NormalizedRecord) -> f64,
{
    let mut rows = group_means(records, key, value);
    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    rows
}

/// Mean of `value` per group, lowest first.
pub fn lowest_mean_by<K, F, G>(records: &[&NormalizedRecord], key: F, value: G) -> Vec<GroupMean<K>>
where
    K: Ord,
    F: Fn(&NormalizedRecord) -> K,
    G: Fn(&NormalizedRecord) -> f64,
{
    let mut rows = group_means(records, key, value);
    rows.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    rows
}

/// The `n` records with the highest `score`, lower restaurant ids first on ties.
///
/// Returns every record when fewer than `n` are available.
pub fn top_n<'a, F>(
    records: &[&'a NormalizedRecord],
    n: usize,
    score: F,
) -> Vec<&'a NormalizedRecord>
where
    F: Fn(&NormalizedRecord) -> f64,
{
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        score(*b)
            .total_cmp(&score(*a))
            .then_with(|| a.restaurant_id().cmp(&b.restaurant_id()))
    });
    ranked.truncate(n);
    ranked
}

/// Number of distinct values of `field`.
pub fn distinct_count<V, F>(records: &[&NormalizedRecord], field: F) -> usize
where
    V: Ord,
    F: Fn(&NormalizedRecord) -> V,
{
    records.iter().map(|&r| field(r)).collect::<BTreeSet<_>>().len()
}

/// Distinct values of `field` in order of first appearance.
pub fn distinct_values<V, F>(records: &[&NormalizedRecord], field: F) -> Vec<V>
where
    V: Ord + Clone,
    F: Fn(&NormalizedRecord) -> V,
{
    let mut seen = BTreeSet::new();
    records
        .iter()
        .map(|&r| field(r))
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

pub fn sum_by<F>(records: &[&NormalizedRecord], field: F) -> u64
where
    F: Fn(&NormalizedRecord) -> u64,
{
    records.iter().map(|&r| field(r)).sum()
}

/// Keeps the first `n` rows of an ordered result.
pub fn head<T>(mut rows: Vec<T>, n: usize) -> Vec<T> {
    rows.truncate(n);
    rows
}
