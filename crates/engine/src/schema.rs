//! Schema model: which columns play which part in each flow.

use liftcheck_config::SchemaConfig;
use liftcheck_core::column::ColumnRole;
use serde::{Deserialize, Serialize};

/// Column names for the whole inspection workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectionSchema {
    pub primary: PrimarySchema,
    pub secondary: SecondarySchema,
    pub result: ResultSchema,
}

/// The main contactor decision table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimarySchema {
    /// First entry question, offered over the whole table.
    pub category_column: String,
    /// Second entry question, filtered by category only.
    pub panel_model_column: String,
    /// Third entry question; the generic walk starts after it.
    pub slope_column: String,
    /// Columns answered with a comment instead of a question.
    #[serde(default)]
    pub commentary_columns: Vec<String>,
    /// Columns never asked, only shown on the result.
    #[serde(default)]
    pub result_only_columns: Vec<String>,
}

impl PrimarySchema {
    pub fn new(
        category_column: impl Into<String>,
        panel_model_column: impl Into<String>,
        slope_column: impl Into<String>,
    ) -> Self {
        Self {
            category_column: category_column.into(),
            panel_model_column: panel_model_column.into(),
            slope_column: slope_column.into(),
            commentary_columns: Vec::new(),
            result_only_columns: Vec::new(),
        }
    }

    pub fn with_commentary<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commentary_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_result_only<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.result_only_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Role assignments for the primary table.
    ///
    /// A column listed as both commentary and result-only is result-only.
    pub fn roles(&self) -> Vec<(String, ColumnRole)> {
        let mut roles: Vec<(String, ColumnRole)> = self
            .commentary_columns
            .iter()
            .map(|c| (c.clone(), ColumnRole::Commentary))
            .collect();
        for column in &self.result_only_columns {
            roles.retain(|(c, _)| c != column);
            roles.push((column.clone(), ColumnRole::ResultOnly));
        }
        roles
    }
}

impl Default for PrimarySchema {
    fn default() -> Self {
        Self::from(&SchemaConfig::default())
    }
}

/// The backup landing device (UPS) table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondarySchema {
    /// Leading classification column; filters, never asked.
    pub hidden_column: String,
    /// First field, derived from the primary table.
    pub derived_field: String,
}

impl SecondarySchema {
    pub fn new(hidden_column: impl Into<String>, derived_field: impl Into<String>) -> Self {
        Self {
            hidden_column: hidden_column.into(),
            derived_field: derived_field.into(),
        }
    }

    pub fn roles(&self) -> Vec<(String, ColumnRole)> {
        vec![(self.hidden_column.clone(), ColumnRole::Hidden)]
    }
}

impl Default for SecondarySchema {
    fn default() -> Self {
        Self::from(&SchemaConfig::default())
    }
}

/// Columns the result assembler gives special treatment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSchema {
    /// Primary-flow column saying whether a backup landing device exists.
    pub backup_presence_column: String,
    /// Value of that column meaning "present".
    pub backup_presence_value: String,
    /// Row value meaning "no matching model".
    pub no_model_sentinel: String,
    /// `(model column, local override column)` pairs.
    #[serde(default)]
    pub model_overrides: Vec<(String, String)>,
}

impl ResultSchema {
    /// The local-override column for a model-type column.
    pub fn override_for(&self, column: &str) -> Option<&str> {
        self.model_overrides
            .iter()
            .find(|(model, _)| model == column)
            .map(|(_, local)| local.as_str())
    }
}

impl Default for ResultSchema {
    fn default() -> Self {
        Self::from(&SchemaConfig::default())
    }
}

impl From<&SchemaConfig> for PrimarySchema {
    fn from(cfg: &SchemaConfig) -> Self {
        PrimarySchema::new(
            cfg.category_column.clone(),
            cfg.panel_model_column.clone(),
            cfg.slope_column.clone(),
        )
        .with_commentary(cfg.commentary_columns.iter().cloned())
        .with_result_only(cfg.result_only_columns.iter().cloned())
    }
}

impl From<&SchemaConfig> for SecondarySchema {
    fn from(cfg: &SchemaConfig) -> Self {
        SecondarySchema::new(
            cfg.secondary_hidden_column.clone(),
            cfg.derived_field.clone(),
        )
    }
}

impl From<&SchemaConfig> for ResultSchema {
    fn from(cfg: &SchemaConfig) -> Self {
        ResultSchema {
            backup_presence_column: cfg.backup_presence_column.clone(),
            backup_presence_value: cfg.backup_presence_value.clone(),
            no_model_sentinel: cfg.no_model_sentinel.clone(),
            model_overrides: cfg
                .model_overrides
                .iter()
                .map(|o| (o.column.clone(), o.override_column.clone()))
                .collect(),
        }
    }
}

impl From<&SchemaConfig> for InspectionSchema {
    fn from(cfg: &SchemaConfig) -> Self {
        InspectionSchema {
            primary: cfg.into(),
            secondary: cfg.into(),
            result: cfg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_matches_config_defaults() {
        let schema = InspectionSchema::default();
        assert_eq!(schema.primary.category_column, "分類");
        assert_eq!(schema.primary.slope_column, "傾斜有無");
        assert_eq!(schema.secondary.hidden_column, "分類");
        assert_eq!(
            schema.secondary.derived_field,
            "主回路電磁接触器フェールセーフ該当有無"
        );
        assert_eq!(
            schema.result.override_for("ブレーキ用接触器型式②"),
            Some("ブレーキ用接触器型式②_現地型式")
        );
        assert_eq!(schema.result.override_for("備考"), None);
    }

    #[test]
    fn result_only_wins_over_commentary() {
        let schema = PrimarySchema::new("c", "p", "s")
            .with_commentary(["note", "both"])
            .with_result_only(["both"]);
        let roles = schema.roles();
        assert!(roles.contains(&("note".to_string(), ColumnRole::Commentary)));
        assert!(roles.contains(&("both".to_string(), ColumnRole::ResultOnly)));
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn secondary_marks_hidden_column() {
        let schema = SecondarySchema::new("kind", "fs");
        assert_eq!(schema.roles(), vec![("kind".to_string(), ColumnRole::Hidden)]);
    }
}
