//! Cross-table derivation and the secondary (backup landing device) flow.
//!
//! The secondary table opens with a value it cannot ask for: whether the
//! main circuit contactor is fail-safe. That value lives in the primary
//! table, so it is computed there from the primary-flow answers and handed
//! to the client as a read-only fill. Only then does the secondary table's
//! own walk begin.

use crate::decision::DecisionTable;
use crate::schema::SecondarySchema;
use crate::walk::next_step;
use liftcheck_core::selection::Selection;
use liftcheck_core::step::{Flow, StepResult};
use tracing::warn;

/// Compute `field` from the primary table narrowed by `base`.
///
/// Always yields an [`StepResult::AutoFill`]. Without a primary table, or
/// when nothing matches, the fill is empty and the secondary walk then
/// offers its unfiltered candidates.
pub fn derive_first_field(
    primary: Option<&DecisionTable>,
    base: &Selection,
    field: &str,
) -> StepResult {
    let values = primary
        .map(|table| table.candidates(base).distinct_non_empty(field))
        .unwrap_or_default();

    if values.len() > 1 {
        warn!(
            field,
            candidates = values.len(),
            "Derived field is ambiguous; using the first value"
        );
    }

    StepResult::AutoFill {
        field: field.to_string(),
        value: values.into_iter().next().unwrap_or_default(),
    }
}

/// Next step of the secondary flow.
///
/// `base` is the finished primary selection, `secondary` the answers given
/// so far in this flow. The derived field comes first; after it the walk
/// starts past the hidden leading column.
pub fn next_secondary_step(
    primary: Option<&DecisionTable>,
    table: &DecisionTable,
    schema: &SecondarySchema,
    base: &Selection,
    secondary: &Selection,
) -> StepResult {
    if !secondary.contains(&schema.derived_field) {
        return derive_first_field(primary, base, &schema.derived_field);
    }

    let start = table
        .position(&schema.hidden_column)
        .map_or(0, |idx| idx + 1);
    next_step(table, secondary, start, Flow::Secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftcheck_core::column::ColumnRole;
    use liftcheck_core::table::Table;
    use std::sync::Arc;

    const FS: &str = "fail_safe";

    fn primary() -> DecisionTable {
        let table = Table::from_records(
            ["category", "model", "note", FS],
            [
                vec!["A", "M1", "n1", "yes"],
                vec!["A", "M2", "n2", "no"],
                vec!["B", "M3", "", ""],
            ],
        );
        DecisionTable::new(
            Arc::new(table),
            &[("note".to_string(), ColumnRole::Commentary)],
        )
    }

    fn secondary() -> (DecisionTable, SecondarySchema) {
        let schema = SecondarySchema::new("kind", FS);
        let table = Table::from_records(
            ["kind", FS, "device", "relay"],
            [
                vec!["UPS", "yes", "D1", "R1"],
                vec!["UPS", "yes", "D2", "R2"],
                vec!["UPS", "no", "D3", ""],
            ],
        );
        (DecisionTable::new(Arc::new(table), &schema.roles()), schema)
    }

    fn fill(value: &str) -> StepResult {
        StepResult::AutoFill {
            field: FS.into(),
            value: value.into(),
        }
    }

    #[test]
    fn derives_single_value() {
        let base = Selection::new().with("category", "A").with("model", "M1");
        assert_eq!(derive_first_field(Some(&primary()), &base, FS), fill("yes"));
    }

    #[test]
    fn commentary_in_base_does_not_block_derivation() {
        let base = Selection::new()
            .with("category", "A")
            .with("model", "M2")
            .with("note", "n1 / n2");
        assert_eq!(derive_first_field(Some(&primary()), &base, FS), fill("no"));
    }

    #[test]
    fn no_candidates_fill_empty() {
        let base = Selection::new().with("category", "B");
        assert_eq!(derive_first_field(Some(&primary()), &base, FS), fill(""));

        let base = Selection::new().with("category", "Z");
        assert_eq!(derive_first_field(Some(&primary()), &base, FS), fill(""));
    }

    #[test]
    fn absent_column_or_table_fill_empty() {
        let base = Selection::new().with("category", "A");
        assert_eq!(
            derive_first_field(Some(&primary()), &base, "missing"),
            StepResult::AutoFill {
                field: "missing".into(),
                value: String::new(),
            }
        );
        assert_eq!(derive_first_field(None, &base, FS), fill(""));
    }

    #[test]
    fn ambiguous_takes_first_sorted() {
        let base = Selection::new().with("category", "A");
        assert_eq!(derive_first_field(Some(&primary()), &base, FS), fill("no"));
    }

    #[test]
    fn secondary_flow_starts_with_derivation() {
        let (table, schema) = secondary();
        let base = Selection::new().with("category", "A").with("model", "M1");
        let step = next_secondary_step(Some(&primary()), &table, &schema, &base, &Selection::new());
        assert_eq!(step, fill("yes"));
    }

    #[test]
    fn secondary_flow_skips_hidden_and_derived_columns() {
        let (table, schema) = secondary();
        let base = Selection::new().with("category", "A").with("model", "M1");
        let ups = Selection::new().with(FS, "yes");

        let step = next_secondary_step(Some(&primary()), &table, &schema, &base, &ups);
        assert_eq!(
            step,
            StepResult::Options {
                field: "device".into(),
                values: vec!["D1".into(), "D2".into()],
            }
        );

        let ups = ups.with("device", "D2");
        let step = next_secondary_step(Some(&primary()), &table, &schema, &base, &ups);
        assert_eq!(
            step,
            StepResult::AutoSelect {
                field: "relay".into(),
                values: vec!["R2".into()],
            }
        );

        let ups = ups.with("relay", "R2");
        assert_eq!(
            next_secondary_step(Some(&primary()), &table, &schema, &base, &ups),
            StepResult::Done(Flow::Secondary)
        );
    }

    #[test]
    fn empty_fill_offers_unfiltered_candidates() {
        let (table, schema) = secondary();
        let ups = Selection::new().with(FS, "");
        let step = next_secondary_step(None, &table, &schema, &Selection::new(), &ups);
        assert_eq!(
            step,
            StepResult::Options {
                field: "device".into(),
                values: vec!["D1".into(), "D2".into(), "D3".into()],
            }
        );
    }

    #[test]
    fn empty_candidates_skip() {
        let (table, schema) = secondary();
        let ups = Selection::new().with(FS, "no").with("device", "D3");
        assert_eq!(
            next_secondary_step(None, &table, &schema, &Selection::new(), &ups),
            StepResult::Skip {
                field: "relay".into()
            }
        );
    }
}
