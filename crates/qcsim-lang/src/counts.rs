//! Aggregated measurement outcomes.

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// How many times each bitstring was observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` more observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring`, zero if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum over all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outcomes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Outcomes by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl FromIterator<String> for Counts {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for bitstring in iter {
            counts.insert(bitstring, 1);
        }
        counts
    }
}

// Serialised in `sorted` order so output is stable.
impl Serialize for Counts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted = self.sorted();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (bitstring, count) in sorted {
            map.serialize_entry(bitstring, &count)?;
        }
        map.end()
    }
}
