//! Partitioned group-by helpers shared by the reports.
//!
//! Each rayon worker folds its slice of flights into a private map and the
//! partial maps are merged pairwise, so every accumulator must merge
//! associatively.

use crate::models::Flight;
use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

pub(crate) trait Merge {
    fn merge(&mut self, other: Self);
}

impl Merge for u64 {
    fn merge(&mut self, other: Self) {
        *self += other;
    }
}

/// Running mean that ignores absent values. A group whose values are all
/// absent still exists and has no mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    sum: i64,
    count: u64,
}

impl MeanAccumulator {
    pub fn push(&mut self, value: Option<i32>) {
        if let Some(value) = value {
            self.sum += i64::from(value);
            self.count += 1;
        }
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

impl Merge for MeanAccumulator {
    fn merge(&mut self, other: Self) {
        self.sum += other.sum;
        self.count += other.count;
    }
}

/// Group flights by `key` (dropping those that map to `None`) and fold each
/// group with `update`.
pub(crate) fn aggregate_by<'a, K, A, F, U>(flights: &'a [Flight], key: F, update: U) -> HashMap<K, A>
where
    K: Eq + Hash + Send,
    A: Default + Merge + Send,
    F: Fn(&'a Flight) -> Option<K> + Sync + Send,
    U: Fn(&mut A, &'a Flight) + Sync + Send,
{
    flights
        .par_iter()
        .filter_map(|flight| key(flight).map(|group| (group, flight)))
        .fold(HashMap::new, |mut groups: HashMap<K, A>, (group, flight)| {
            update(groups.entry(group).or_default(), flight);
            groups
        })
        .reduce(HashMap::new, merge_groups)
}

pub(crate) fn count_by<'a, K, F>(flights: &'a [Flight], key: F) -> HashMap<K, u64>
where
    K: Eq + Hash + Send,
    F: Fn(&'a Flight) -> Option<K> + Sync + Send,
{
    aggregate_by(flights, key, |count: &mut u64, _| *count += 1)
}

fn merge_groups<K, A>(mut left: HashMap<K, A>, mut right: HashMap<K, A>) -> HashMap<K, A>
where
    K: Eq + Hash,
    A: Merge,
{
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }

    for (group, partial) in right {
        match left.entry(group) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(partial),
            Entry::Vacant(entry) => {
                entry.insert(partial);
            }
        }
    }

    left
}
