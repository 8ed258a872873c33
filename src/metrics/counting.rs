//! Occurrence counting for metric IDs.
//!
//! [`CountingMap`] remembers the order in which keys were first seen, which
//! is what breaks ties when keys are ranked by count.

use ahash::AHashMap;

/// Key to occurrence count, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct CountingMap {
    index: AHashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl CountingMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Add `count` occurrences of `key`
    pub fn add(&mut self, key: &str, count: u64) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                self.index.insert(key.to_owned(), self.entries.len());
                self.entries.push((key.to_owned(), count));
            },
        }
    }

    /// Fold `other` into this map.
    ///
    /// Keys new to `self` are appended in `other`'s order, so merging maps
    /// built over consecutive slices gives the same order as one pass.
    pub fn merge(&mut self, other: CountingMap) {
        for (key, count) in other.entries {
            self.add(&key, count);
        }
    }

    /// Count for `key`, if it was seen
    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries ordered by descending count, ties in first-seen order
    pub fn ranked(&self) -> Vec<(String, u64)> {
        let mut ranked = self.entries.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl PartialEq for CountingMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for CountingMap {}

/// Return `map` with `key` counted once more.
pub fn insert_or_increment(mut map: CountingMap, key: &str) -> CountingMap {
    map.increment(key);
    map
}

/// Distinct keys of `map`, highest count first.
pub fn keys_by_descending_value(map: &CountingMap) -> Vec<String> {
    map.ranked().into_iter().map(|(key, _)| key).collect()
}
