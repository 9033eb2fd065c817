//! Metadata Table
//!
//! Key/value settings embedded in slicer comments.

use std::collections::HashMap;

use serde::Serialize;

/// Settings read from `; key = value` comments. Later keys overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigTable {
    entries: HashMap<String, String>,
}

impl ConfigTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one entry, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge entries, last write wins
    pub fn merge<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.merge(iter);
        table
    }
}

impl From<HashMap<String, String>> for ConfigTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}
