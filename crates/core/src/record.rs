//! The assembled determination shown at the end of a session.

use serde::{Deserialize, Serialize};

/// Displayed for any value the fallback chain could not resolve.
pub const PLACEHOLDER: &str = "—";

/// Ordered groups of labeled values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub groups: Vec<ResultGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub title: String,
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub label: String,
    pub value: String,
}

impl ResultRecord {
    pub fn group(&self, title: &str) -> Option<&ResultGroup> {
        self.groups.iter().find(|g| g.title == title)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.title.as_str()).collect()
    }

    /// Every value in the record, in display order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.rows.iter().map(|r| r.value.as_str()))
    }
}

impl ResultGroup {
    /// Value of the first row with the given label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}
