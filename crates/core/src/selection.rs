//! The client's answered-so-far state.
//!
//! A [`Selection`] is an insertion-ordered map from column name to chosen
//! value. The client owns it and replays it on every turn; the engine never
//! keeps one between calls. An empty value means "resolved, but no
//! constraint" (a skipped column, for instance).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<(String, String)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's value, keeping its original position if already present.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// The value for a column, empty when absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// This selection overlaid with `other`; `other` wins on shared keys.
    pub fn merged(&self, other: &Selection) -> Selection {
        let mut out = self.clone();
        for (column, value) in other.iter() {
            out.insert(column, value);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selection {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for (k, v) in iter {
            selection.insert(k, v);
        }
        selection
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, value) in &self.entries {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SelectionVisitor)
    }
}

struct SelectionVisitor;

impl<'de> Visitor<'de> for SelectionVisitor {
    type Value = Selection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of column names to selected values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Selection, A::Error> {
        let mut selection = Selection::new();
        // null is accepted and read as "no value"
        while let Some((column, value)) = access.next_entry::<String, Option<String>>()? {
            selection.insert(column, value.unwrap_or_default());
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_first_position() {
        let mut sel = Selection::new().with("a", "1").with("b", "2");
        sel.insert("a", "3");
        let keys: Vec<&str> = sel.iter().map(|(c, _)| c).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(sel.value("a"), "3");
    }

    #[test]
    fn missing_key_reads_empty() {
        let sel = Selection::new();
        assert_eq!(sel.get("x"), None);
        assert_eq!(sel.value("x"), "");
        assert!(!sel.contains("x"));
    }

    #[test]
    fn deserialize_keeps_document_order() {
        let sel: Selection = serde_json::from_str(r#"{"z": "1", "a": "2", "m": null}"#).unwrap();
        let keys: Vec<&str> = sel.iter().map(|(c, _)| c).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(sel.get("m"), Some(""));
    }

    #[test]
    fn merged_prefers_other() {
        let base = Selection::new().with("a", "1").with("b", "2");
        let over = Selection::new().with("b", "x").with("c", "3");
        let merged = base.merged(&over);
        assert_eq!(merged.value("b"), "x");
        assert_eq!(merged.len(), 3);
        assert_eq!(serde_json::to_string(&merged).unwrap(), r#"{"a":"1","b":"x","c":"3"}"#);
    }
}
