//! Key/value fields pulled out of a carved file by the metadata extractor.

use indexmap::IndexMap;

/// String-to-string fields extracted from a carved file.
///
/// Backed by an insertion-ordered map: re-inserting an existing key
/// overwrites its value in place without moving it to the end, which keeps
/// a stable, readable field order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(IndexMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Metadata(IndexMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
