use indexmap::map::Iter;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::schema;

/// Per-key visit counts.
///
/// Iterates in first-insertion order. Merging keeps the left side's order
/// and appends keys only the right side has, so the order of the merged
/// table is the order in which keys first appear in the input file. The
/// report's path order depends on this.
///
/// Equality compares counts only, not order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyMap {
    counts: IndexMap<Vec<u8>, u64, FxBuildHasher>,
    skipped: u64,
}

impl FrequencyMap {
    pub fn with_capacity(n: usize) -> Self {
        FrequencyMap {
            counts: IndexMap::with_capacity_and_hasher(n, FxBuildHasher),
            skipped: 0,
        }
    }

    /// Counts one line. Returns false if the line was too short to carry a
    /// key; it is then tallied as skipped.
    pub fn record(&mut self, line: &[u8]) -> bool {
        match schema::extract_key(line) {
            Some(key) => {
                self.add(key, 1);
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Keys must already satisfy [`schema::is_valid_key`].
    pub(crate) fn add(&mut self, key: &[u8], n: u64) {
        debug_assert!(schema::is_valid_key(key));
        if let Some(c) = self.counts.get_mut(key) {
            *c += n;
        } else {
            self.counts.insert(Vec::from(key), n);
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of counted lines.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of lines too short to carry a key.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn iter(&self) -> Iter<'_, Vec<u8>, u64> {
        self.counts.iter()
    }

    /// Folds `other` into `self`, summing shared keys.
    pub fn merge_from(&mut self, other: FrequencyMap) {
        self.counts.reserve(other.counts.len());
        for (k, n) in other.counts {
            *self.counts.entry(k).or_insert(0) += n;
        }
        self.skipped += other.skipped;
    }
}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = (&'a Vec<u8>, &'a u64);
    type IntoIter = Iter<'a, Vec<u8>, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub fn merge(mut l: FrequencyMap, r: FrequencyMap) -> FrequencyMap {
    l.merge_from(r);
    l
}

/// Merges any number of partial tables, left to right.
pub fn merge_all(parts: Vec<FrequencyMap>) -> FrequencyMap {
    parts.into_iter().reduce(merge).unwrap_or_default()
}
