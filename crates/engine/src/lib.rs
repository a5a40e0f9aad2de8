//! # LiftCheck Engine
//!
//! Column-driven decision engine for contactor inspections.
//!
//! ## Architecture
//!
//! ```text
//! Selection ──► InspectionEngine
//!                 ├── primary_step    ─► entry questions ─► walk ─► StepResult
//!                 ├── secondary_step  ─► derive ─► walk ─────────► StepResult
//!                 └── assemble        ─► row lookup ─► resolvers ─► ResultRecord
//! ```
//!
//! Every call is a pure function of the loaded tables and the selections
//! passed in; the engine keeps no session state.

pub mod assemble;
pub mod decision;
pub mod derive;
pub mod layout;
pub mod primary;
pub mod schema;
pub mod walk;

pub use assemble::assemble;
pub use decision::DecisionTable;
pub use derive::{derive_first_field, next_secondary_step};
pub use layout::{FieldLayout, GroupLayout, ResultLayout};
pub use primary::next_primary_step;
pub use schema::{InspectionSchema, PrimarySchema, ResultSchema, SecondarySchema};
pub use walk::next_step;

use liftcheck_core::record::ResultRecord;
use liftcheck_core::selection::Selection;
use liftcheck_core::step::StepResult;
use liftcheck_core::table::Table;
use std::sync::Arc;
use tracing::debug;

/// A decision flow cannot run because its table was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("CSV not found")]
    PrimaryUnavailable,

    #[error("UPS CSV not found")]
    SecondaryUnavailable,
}

/// The loaded tables, tagged with their schema, ready to answer turns.
#[derive(Debug, Clone)]
pub struct InspectionEngine {
    primary: Option<DecisionTable>,
    secondary: Option<DecisionTable>,
    schema: InspectionSchema,
    layout: ResultLayout,
}

impl InspectionEngine {
    /// Build from whichever tables are available. A flow whose table is
    /// missing reports [`EngineError`]; result assembly still works.
    pub fn new(
        schema: InspectionSchema,
        layout: ResultLayout,
        primary: Option<Arc<Table>>,
        secondary: Option<Arc<Table>>,
    ) -> Self {
        let primary = primary.map(|t| DecisionTable::new(t, &schema.primary.roles()));
        let secondary = secondary.map(|t| DecisionTable::new(t, &schema.secondary.roles()));
        Self {
            primary,
            secondary,
            schema,
            layout,
        }
    }

    pub fn schema(&self) -> &InspectionSchema {
        &self.schema
    }

    pub fn layout(&self) -> &ResultLayout {
        &self.layout
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Next step of the main contactor flow.
    pub fn primary_step(&self, selection: &Selection) -> Result<StepResult, EngineError> {
        let table = self
            .primary
            .as_ref()
            .ok_or(EngineError::PrimaryUnavailable)?;
        let step = next_primary_step(table, &self.schema.primary, selection);
        debug!(
            flow = "primary",
            answered = selection.len(),
            field = step.field().unwrap_or(""),
            kind = step.kind(),
            "Step computed"
        );
        Ok(step)
    }

    /// Next step of the backup landing device flow.
    pub fn secondary_step(
        &self,
        base: &Selection,
        secondary: &Selection,
    ) -> Result<StepResult, EngineError> {
        let table = self
            .secondary
            .as_ref()
            .ok_or(EngineError::SecondaryUnavailable)?;
        let step = next_secondary_step(
            self.primary.as_ref(),
            table,
            &self.schema.secondary,
            base,
            secondary,
        );
        debug!(
            flow = "secondary",
            answered = secondary.len(),
            field = step.field().unwrap_or(""),
            kind = step.kind(),
            "Step computed"
        );
        Ok(step)
    }

    /// Result record for a finished session. Never fails.
    pub fn assemble(&self, selection: &Selection, secondary: &Selection) -> ResultRecord {
        assemble(
            self.primary.as_ref(),
            &self.layout,
            &self.schema.result,
            selection,
            secondary,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftcheck_core::step::Flow;

    fn engine(primary: Option<Table>, secondary: Option<Table>) -> InspectionEngine {
        InspectionEngine::new(
            InspectionSchema::default(),
            ResultLayout::contactors(),
            primary.map(Arc::new),
            secondary.map(Arc::new),
        )
    }

    fn primary_table() -> Table {
        Table::from_records(
            [
                "分類",
                "制御盤型式",
                "傾斜有無",
                "停電時自動着床装置の有無",
                "主回路電磁接触器フェールセーフ該当有無",
                "電動機主回路用接触器型式",
            ],
            [
                vec!["ロープ式", "CP-1", "", "有", "該当", "該当型式無"],
                vec!["ロープ式", "CP-2", "", "無", "非該当", "MC-20"],
            ],
        )
    }

    fn ups_table() -> Table {
        Table::from_records(
            [
                "分類",
                "主回路電磁接触器フェールセーフ該当有無",
                "UPS主回路電磁接触器フェールセーフ該当有無",
            ],
            [vec!["UPS", "該当", "該当"], vec!["UPS", "非該当", "非該当"]],
        )
    }

    #[test]
    fn missing_tables_report_unavailable() {
        let engine = engine(None, None);
        let sel = Selection::new();
        assert_eq!(
            engine.primary_step(&sel),
            Err(EngineError::PrimaryUnavailable)
        );
        assert_eq!(
            engine.secondary_step(&sel, &sel),
            Err(EngineError::SecondaryUnavailable)
        );
        assert_eq!(EngineError::PrimaryUnavailable.to_string(), "CSV not found");
        assert_eq!(
            EngineError::SecondaryUnavailable.to_string(),
            "UPS CSV not found"
        );
        assert_eq!(engine.assemble(&sel, &sel).groups.len(), 3);
    }

    #[test]
    fn header_only_table_is_not_an_error() {
        let engine = engine(
            Some(Table::from_records(
                ["分類", "制御盤型式", "傾斜有無"],
                Vec::<Vec<&str>>::new(),
            )),
            None,
        );
        let step = engine.primary_step(&Selection::new()).unwrap();
        assert_eq!(
            step,
            StepResult::Options {
                field: "分類".into(),
                values: vec![],
            }
        );
    }

    #[test]
    fn full_session_with_backup_device() {
        let engine = engine(Some(primary_table()), Some(ups_table()));

        let mut sel = Selection::new();
        loop {
            match engine.primary_step(&sel).unwrap() {
                StepResult::Done(flow) => {
                    assert_eq!(flow, Flow::Primary);
                    break;
                }
                StepResult::Options { field, values } | StepResult::AutoSelect { field, values } => {
                    let pick = if field == "制御盤型式" { "CP-1".to_string() } else { values[0].clone() };
                    sel.insert(field, pick);
                }
                StepResult::Skip { field } => sel.insert(field, ""),
                other => panic!("unexpected step {other:?}"),
            }
        }
        assert_eq!(sel.get("停電時自動着床装置の有無"), Some("有"));

        let mut ups = Selection::new();
        let first = engine.secondary_step(&sel, &ups).unwrap();
        assert_eq!(
            first,
            StepResult::AutoFill {
                field: "主回路電磁接触器フェールセーフ該当有無".into(),
                value: "該当".into(),
            }
        );
        ups.insert("主回路電磁接触器フェールセーフ該当有無", "該当");

        let next = engine.secondary_step(&sel, &ups).unwrap();
        assert_eq!(next.field(), Some("UPS主回路電磁接触器フェールセーフ該当有無"));
        ups.insert("UPS主回路電磁接触器フェールセーフ該当有無", "該当");
        assert_eq!(
            engine.secondary_step(&sel, &ups).unwrap(),
            StepResult::Done(Flow::Secondary)
        );

        let record = engine.assemble(&sel, &ups);
        assert_eq!(
            record.titles(),
            vec![
                "電動機用接触器",
                "停電時自動着床装置用接触器",
                "ブレーキ用接触器①",
                "ブレーキ用接触器②",
            ]
        );
        let backup = record.group("停電時自動着床装置用接触器").unwrap();
        assert_eq!(backup.value("フェールセーフ"), Some("該当"));
        let motor = record.group("電動機用接触器").unwrap();
        assert_eq!(motor.value("フェールセーフ"), Some("該当"));
        assert_eq!(motor.value("型式"), Some("該当型式無"));
    }
}
