use std::hash::Hash;

use indexmap::map::{
    IntoIter,
    Iter,
};
use indexmap::{
    IndexMap,
    IndexSet,
};
use itertools::Itertools;

use super::typedef::CountType;

/// Occurrence counts keyed by token or character.
///
/// Keys keep first-occurrence order, which follows document traversal order
/// when maps are built verse by verse and merged bottom-up. Equality ignores
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap<K: Hash + Eq> {
    counts: IndexMap<K, CountType>,
}

impl<K: Hash + Eq> Default for FrequencyMap<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(key, count)` pairs, summing repeated keys.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, CountType)>, {
        let mut map = FrequencyMap::new();
        for (key, count) in pairs {
            map.add(key, count);
        }
        map
    }

    /// Adds `count` occurrences of `key`.
    pub fn add(
        &mut self,
        key: K,
        count: CountType,
    ) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    /// Adds every count of `other` into this map.
    pub fn merge(
        &mut self,
        other: &FrequencyMap<K>,
    ) {
        for (key, &count) in other.counts.iter() {
            self.add(key.clone(), count);
        }
    }

    /// Sums several maps into a new one. Inputs are left untouched.
    pub fn merged<I>(maps: I) -> Self
    where
        I: IntoIterator<Item = FrequencyMap<K>>, {
        maps.into_iter()
            .fold(FrequencyMap::new(), |mut acc, map| {
                acc.merge(&map);
                acc
            })
    }

    pub fn get(
        &self,
        key: &K,
    ) -> CountType {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(
        &self,
        key: &K,
    ) -> bool {
        self.counts.contains_key(key)
    }

    /// Sum of all counts.
    pub fn total(&self) -> CountType {
        self.counts.values().sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, K, CountType> {
        self.counts.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = CountType> + '_ {
        self.counts.values().copied()
    }

    /// Distinct keys in first-occurrence order.
    pub fn key_set(&self) -> IndexSet<K> {
        self.counts.keys().cloned().collect()
    }

    /// Copy ordered by descending count. Ties keep first-occurrence order.
    pub fn sorted(&self) -> Self {
        let counts = self
            .counts
            .iter()
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        Self { counts }
    }

    /// The most frequent keys, at most `n` of them.
    pub fn most_common(
        &self,
        n: usize,
    ) -> Vec<(K, CountType)> {
        self.sorted().counts.into_iter().take(n).collect()
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for FrequencyMap<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut map = FrequencyMap::new();
        for key in iter {
            map.add(key, 1);
        }
        map
    }
}

impl<K: Hash + Eq> IntoIterator for FrequencyMap<K> {
    type IntoIter = IntoIter<K, CountType>;
    type Item = (K, CountType);

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a, K: Hash + Eq> IntoIterator for &'a FrequencyMap<K> {
    type IntoIter = Iter<'a, K, CountType>;
    type Item = (&'a K, &'a CountType);

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
