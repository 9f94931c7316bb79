use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::Weight;

/// Items that share one point in simulated time.
///
/// Items are bucketed by weight. Iteration visits buckets from the highest
/// weight down and, inside a bucket, items in insertion order. Nothing is ever
/// removed and duplicates are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeslot<T> {
    buckets: BTreeMap<Reverse<Weight>, Vec<T>>,
}

impl<T> Default for Timeslot<T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<T> Timeslot<T> {
    /// Create an empty timeslot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the bucket for `weight`, creating the bucket if needed.
    pub fn add(&mut self, item: T, weight: Weight) {
        self.buckets.entry(Reverse(weight)).or_default().push(item);
    }

    /// All items in execution order.
    pub fn to_list(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Iterate items in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flatten()
    }

    /// Iterate items mutably in execution order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buckets.values_mut().flatten()
    }

    /// Buckets as `(weight, items)` pairs, highest weight first.
    pub fn buckets(&self) -> impl Iterator<Item = (Weight, &[T])> {
        self.buckets
            .iter()
            .map(|(Reverse(weight), items)| (*weight, items.as_slice()))
    }

    /// Total number of items across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True if no item has been added.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}
