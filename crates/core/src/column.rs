//! Column descriptors: a column name tagged with how the engine treats it.

use serde::{Deserialize, Serialize};

/// How the engine treats a column while walking a decision table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// An ordinary question: the user picks one of the candidate values.
    #[default]
    Question,
    /// Informational text shown to the user; never narrows the candidates.
    Commentary,
    /// Only shown on the final result, never asked.
    ResultOnly,
    /// Used for filtering but never surfaced as a question.
    Hidden,
}

impl ColumnRole {
    /// Whether a selection value for this column constrains candidate rows.
    pub fn filters(self) -> bool {
        !matches!(self, ColumnRole::Commentary)
    }
}

/// A column name plus its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub role: ColumnRole,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_commentary_is_non_filtering() {
        assert!(ColumnRole::Question.filters());
        assert!(ColumnRole::ResultOnly.filters());
        assert!(ColumnRole::Hidden.filters());
        assert!(!ColumnRole::Commentary.filters());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&ColumnRole::ResultOnly).unwrap();
        assert_eq!(json, "\"result_only\"");
    }
}
