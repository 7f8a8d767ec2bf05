use crate::{
    error::CounterError,
    normalize::{Normalize, Normalized},
};
use std::{
    borrow::Borrow,
    collections::{hash_map::{self, RandomState}, HashMap},
    hash::{BuildHasher, Hash},
    ops::{AddAssign, Deref, SubAssign},
};
use serde::{Deserialize, Serialize};

/// A multiset: a mapping from elements to signed counts.
///
/// Counts are never pruned. Subtracting may leave keys with zero or negative
/// counts, and they stay in the counter until it is dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize + Eq + Hash, S: BuildHasher",
    deserialize = "T: Deserialize<'de> + Eq + Hash, S: BuildHasher + Default"
))]
pub struct Counter<T, S = RandomState> {
    map: HashMap<T, i64, S>,
}

impl<T> Counter<T, RandomState>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Builds a counter from text, a sequence of elements or a count mapping.
    ///
    /// Text is counted by character, sequences by element, and mappings are
    /// adopted as they are. Fails without producing a counter if the input is
    /// not one of those shapes.
    pub fn try_from_input<I: Normalize<T>>(input: I) -> Result<Self, CounterError> {
        let normalized = input.normalize()?;
        log::debug!("building counter from {} {}", normalized.len(), normalized.shape());
        Ok(Self::from_normalized(normalized))
    }
}

impl<T, S> Counter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    pub fn from_normalized(normalized: Normalized<T>) -> Self {
        match normalized {
            Normalized::Elements(elements) => elements.into_iter().collect(),
            Normalized::Counts(counts) => Self { map: counts.into_iter().collect() },
        }
    }
}

impl<T, S> Counter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Adds every count of `other` to this counter, inserting missing keys.
    pub fn update<S2>(&mut self, other: &Counter<T, S2>)
        where T: Clone
    {
        log::trace!("update: merging {} keys into {}", other.len(), self.len());
        for (key, &count) in other.iter() {
            match self.map.get_mut(key) {
                Some(existing) => *existing = existing.wrapping_add(count),
                None => {
                    self.map.insert(key.clone(), count);
                }
            }
        }
    }

    /// Subtracts every count of `other` from this counter, inserting missing
    /// keys with the negated count.
    pub fn subtract<S2>(&mut self, other: &Counter<T, S2>)
        where T: Clone
    {
        log::trace!("subtract: removing {} keys from {}", other.len(), self.len());
        for (key, &count) in other.iter() {
            match self.map.get_mut(key) {
                Some(existing) => *existing = existing.wrapping_sub(count),
                None => {
                    self.map.insert(key.clone(), count.wrapping_neg());
                }
            }
        }
    }

    /// Count of `key`, zero if it was never counted.
    #[inline]
    pub fn count<Q>(&self, key: &Q) -> i64
        where T: Borrow<Q>, Q: Hash + Eq + ?Sized
    {
        self.map.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts, wrapping like `update` and `subtract` do.
    pub fn total(&self) -> i64 {
        self.map.values().fold(0i64, |acc, &count| acc.wrapping_add(count))
    }

    pub fn max_count(&self) -> Option<i64> {
        self.map.values().max().copied()
    }

    /// The `n` elements with the highest counts, highest first. Ties are
    /// returned in no particular order.
    pub fn most_common(&self, n: usize) -> Vec<(&T, i64)> {
        let mut entries: Vec<(&T, i64)> = self.map.iter().map(|(key, &count)| (key, count)).collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }

    #[inline]
    pub fn into_inner(self) -> HashMap<T, i64, S> {
        self.map
    }
}

impl<T, S> Default for Counter<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self { map: HashMap::default() }
    }
}

impl<T, S> Deref for Counter<T, S> {
    type Target = HashMap<T, i64, S>;
    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl<T, S> PartialEq for Counter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, S> Eq for Counter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{}

impl<T, S> FromIterator<T> for Counter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counter = Self::default();
        counter.extend(iter);
        counter
    }
}

impl<T, S> Extend<T> for Counter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let entry = self.map.entry(item).or_insert(0);
            *entry = entry.wrapping_add(1);
        }
    }
}

impl<T, S> From<HashMap<T, i64, S>> for Counter<T, S> {
    fn from(map: HashMap<T, i64, S>) -> Self {
        Self { map }
    }
}

impl<T, S> IntoIterator for Counter<T, S> {
    type Item = (T, i64);
    type IntoIter = hash_map::IntoIter<T, i64>;
    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a, T, S> IntoIterator for &'a Counter<T, S> {
    type Item = (&'a T, &'a i64);
    type IntoIter = hash_map::Iter<'a, T, i64>;
    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<T, S, S2> AddAssign<&Counter<T, S2>> for Counter<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn add_assign(&mut self, other: &Counter<T, S2>) {
        self.update(other);
    }
}

impl<T, S, S2> SubAssign<&Counter<T, S2>> for Counter<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn sub_assign(&mut self, other: &Counter<T, S2>) {
        self.subtract(other);
    }
}
