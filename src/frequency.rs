use serde::ser::{Serialize, SerializeMap, Serializer};

/// Label -> count table that remembers the order labels were first seen.
///
/// Counts are always >= 1: a label only exists once it has been counted.
/// Ranking is by count descending with ties in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` to a label's count. Adding zero never creates an entry.
    pub fn add(&mut self, key: K, n: usize) {
        if n == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += n,
            None => self.entries.push((key, n)),
        }
    }

    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    pub fn get(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// All entries ranked by count, ties in first-seen order
    pub fn ranked(&self) -> FrequencyTable<K> {
        let mut entries = self.entries.clone();
        // sort_by is stable, which is what keeps ties in first-seen order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        FrequencyTable { entries }
    }

    /// The `n` highest-ranked entries
    pub fn top(&self, n: usize) -> FrequencyTable<K> {
        let mut ranked = self.ranked();
        ranked.entries.truncate(n);
        ranked
    }

    /// Labels of the `n` highest-ranked entries
    pub fn top_keys(&self, n: usize) -> Vec<K> {
        self.top(n).entries.into_iter().map(|(k, _)| k).collect()
    }
}

impl<K: Serialize> Serialize for FrequencyTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, c) in &self.entries {
            map.serialize_entry(k, c)?;
        }
        map.end()
    }
}
