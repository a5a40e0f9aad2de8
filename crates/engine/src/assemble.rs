//! Result assembly.
//!
//! The matching primary row is looked up once; every displayed field is
//! then resolved through [`RESOLVERS`], an ordered list where the first
//! non-empty answer wins. Nothing here fails: a missing table, row, column
//! or answer ends up as [`PLACEHOLDER`].

use crate::decision::DecisionTable;
use crate::layout::{GroupLayout, ResultLayout};
use crate::schema::ResultSchema;
use liftcheck_core::record::{PLACEHOLDER, ResultGroup, ResultRecord, ResultRow};
use liftcheck_core::selection::Selection;
use liftcheck_core::table::Row;

/// Everything a resolver may consult.
pub struct ResolveContext<'a> {
    /// First primary row matching the primary selection.
    pub row: Option<Row<'a>>,
    pub selection: &'a Selection,
    pub secondary: &'a Selection,
    pub schema: &'a ResultSchema,
}

/// One link of the fallback chain.
pub type Resolver = for<'a> fn(&ResolveContext<'a>, &str) -> Option<&'a str>;

/// Fallback chain, highest precedence first.
pub const RESOLVERS: [(&str, Resolver); 4] = [
    ("model_override", model_override),
    ("row", row_value),
    ("selection", selection_value),
    ("secondary", secondary_value),
];

/// A model column whose row value is empty or "no matching model" shows
/// the locally recorded model instead, when one was entered.
fn model_override<'a>(ctx: &ResolveContext<'a>, column: &str) -> Option<&'a str> {
    let local = ctx.schema.override_for(column)?;
    let from_row = ctx.row.map_or("", |row| row.value(column));
    if !from_row.is_empty() && from_row != ctx.schema.no_model_sentinel {
        return None;
    }
    ctx.selection.get(local).filter(|v| !v.is_empty())
}

fn row_value<'a>(ctx: &ResolveContext<'a>, column: &str) -> Option<&'a str> {
    ctx.row
        .and_then(|row| row.get(column))
        .filter(|v| !v.is_empty())
}

fn selection_value<'a>(ctx: &ResolveContext<'a>, column: &str) -> Option<&'a str> {
    ctx.selection.get(column).filter(|v| !v.is_empty())
}

fn secondary_value<'a>(ctx: &ResolveContext<'a>, column: &str) -> Option<&'a str> {
    ctx.secondary.get(column).filter(|v| !v.is_empty())
}

/// Display value of `column`, or the placeholder.
pub fn resolve<'a>(ctx: &ResolveContext<'a>, column: &str) -> &'a str {
    RESOLVERS
        .iter()
        .find_map(|(_, resolver)| resolver(ctx, column))
        .unwrap_or(PLACEHOLDER)
}

/// Build the result record for a finished session.
///
/// The row is matched on `selection` alone; `secondary` only feeds the
/// fallback chain and decides whether the backup group is shown.
pub fn assemble(
    primary: Option<&DecisionTable>,
    layout: &ResultLayout,
    schema: &ResultSchema,
    selection: &Selection,
    secondary: &Selection,
) -> ResultRecord {
    let matches = primary.map(|table| table.candidates(selection));
    let ctx = ResolveContext {
        row: matches.as_ref().and_then(|t| t.row(0)),
        selection,
        secondary,
        schema,
    };

    let mut groups: Vec<ResultGroup> = layout
        .groups
        .iter()
        .map(|group| render_group(&ctx, group))
        .collect();

    if shows_backup_group(schema, selection, secondary) {
        let at = groups.len().min(1);
        groups.insert(at, render_group(&ctx, &layout.backup_group));
    }

    ResultRecord { groups }
}

fn shows_backup_group(schema: &ResultSchema, selection: &Selection, secondary: &Selection) -> bool {
    selection.get(&schema.backup_presence_column) == Some(schema.backup_presence_value.as_str())
        && !secondary.is_empty()
}

fn render_group(ctx: &ResolveContext<'_>, group: &GroupLayout) -> ResultGroup {
    ResultGroup {
        title: group.title.clone(),
        rows: group
            .fields
            .iter()
            .map(|field| ResultRow {
                label: field.label.clone(),
                value: resolve(ctx, &field.column).to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftcheck_core::table::Table;
    use std::sync::Arc;

    fn schema() -> ResultSchema {
        ResultSchema {
            backup_presence_column: "ups".into(),
            backup_presence_value: "yes".into(),
            no_model_sentinel: "none".into(),
            model_overrides: vec![("model".into(), "model_local".into())],
        }
    }

    fn layout() -> ResultLayout {
        ResultLayout {
            groups: vec![
                GroupLayout::new("motor", [("Name", "name"), ("Model", "model")]),
                GroupLayout::new("brake", [("Verdict", "verdict")]),
            ],
            backup_group: GroupLayout::new("backup", [("Fail-safe", "ups_fs")]),
        }
    }

    fn primary(rows: Vec<Vec<&str>>) -> DecisionTable {
        let table = Table::from_records(["kind", "name", "model", "verdict"], rows);
        DecisionTable::new(Arc::new(table), &[])
    }

    fn value<'r>(record: &'r ResultRecord, group: &str, label: &str) -> &'r str {
        record
            .group(group)
            .and_then(|g| g.value(label))
            .unwrap_or_else(|| panic!("no {group}/{label}"))
    }

    #[test]
    fn values_come_from_matching_row() {
        let table = primary(vec![
            vec!["A", "MC-1", "K10", "pass"],
            vec!["B", "MC-2", "K20", "fail"],
        ]);
        let sel = Selection::new().with("kind", "B");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &Selection::new());
        assert_eq!(record.titles(), vec!["motor", "brake"]);
        assert_eq!(value(&record, "motor", "Name"), "MC-2");
        assert_eq!(value(&record, "motor", "Model"), "K20");
        assert_eq!(value(&record, "brake", "Verdict"), "fail");
    }

    #[test]
    fn sentinel_model_uses_local_override() {
        let table = primary(vec![vec!["A", "MC-1", "none", "pass"]]);
        let sel = Selection::new().with("kind", "A").with("model_local", "X-99");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &Selection::new());
        assert_eq!(value(&record, "motor", "Model"), "X-99");
    }

    #[test]
    fn sentinel_model_without_override_is_shown() {
        let table = primary(vec![vec!["A", "MC-1", "none", "pass"]]);
        let sel = Selection::new().with("kind", "A").with("model_local", "");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &Selection::new());
        assert_eq!(value(&record, "motor", "Model"), "none");
    }

    #[test]
    fn real_model_beats_local_override() {
        let table = primary(vec![vec!["A", "MC-1", "K10", "pass"]]);
        let sel = Selection::new().with("kind", "A").with("model_local", "X-99");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &Selection::new());
        assert_eq!(value(&record, "motor", "Model"), "K10");
    }

    #[test]
    fn empty_row_value_falls_back_to_selections() {
        let table = primary(vec![vec!["A", "", "K10", ""]]);
        let sel = Selection::new().with("kind", "A").with("name", "typed name");
        let ups = Selection::new().with("verdict", "from ups");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &ups);
        assert_eq!(value(&record, "motor", "Name"), "typed name");
        assert_eq!(value(&record, "brake", "Verdict"), "from ups");
    }

    #[test]
    fn primary_selection_beats_secondary() {
        let sel = Selection::new().with("verdict", "primary");
        let ups = Selection::new().with("verdict", "secondary");
        let record = assemble(None, &layout(), &schema(), &sel, &ups);
        assert_eq!(value(&record, "brake", "Verdict"), "primary");
    }

    #[test]
    fn secondary_answers_do_not_pick_the_row() {
        let table = primary(vec![
            vec!["A", "MC-1", "K10", "pass"],
            vec!["A", "MC-2", "K20", "fail"],
        ]);
        let sel = Selection::new().with("kind", "A");
        let ups = Selection::new().with("name", "MC-2");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &ups);
        assert_eq!(value(&record, "motor", "Name"), "MC-1");
    }

    #[test]
    fn backup_group_inserted_second() {
        let sel = Selection::new().with("ups", "yes");
        let ups = Selection::new().with("ups_fs", "present");
        let record = assemble(None, &layout(), &schema(), &sel, &ups);
        assert_eq!(record.titles(), vec!["motor", "backup", "brake"]);
        assert_eq!(value(&record, "backup", "Fail-safe"), "present");
    }

    #[test]
    fn backup_group_needs_presence_and_answers() {
        let ups = Selection::new().with("ups_fs", "present");

        let sel = Selection::new().with("ups", "no");
        let record = assemble(None, &layout(), &schema(), &sel, &ups);
        assert_eq!(record.titles(), vec!["motor", "brake"]);

        let sel = Selection::new().with("ups", "yes");
        let record = assemble(None, &layout(), &schema(), &sel, &Selection::new());
        assert_eq!(record.titles(), vec!["motor", "brake"]);
    }

    #[test]
    fn nothing_resolves_to_placeholder() {
        let record = assemble(
            None,
            &ResultLayout::contactors(),
            &ResultSchema::default(),
            &Selection::new(),
            &Selection::new(),
        );
        assert_eq!(record.groups.len(), 3);
        assert!(record.values().all(|v| v == PLACEHOLDER));
    }

    #[test]
    fn unmatched_selection_degrades_to_placeholder() {
        let table = primary(vec![vec!["A", "MC-1", "K10", "pass"]]);
        let sel = Selection::new().with("kind", "Z");
        let record = assemble(Some(&table), &layout(), &schema(), &sel, &Selection::new());
        assert!(record.values().all(|v| v == PLACEHOLDER));
    }

    #[test]
    fn assembly_is_deterministic() {
        let table = primary(vec![
            vec!["A", "MC-1", "none", "pass"],
            vec!["A", "MC-2", "K20", "fail"],
        ]);
        let sel = Selection::new().with("kind", "A").with("ups", "yes");
        let ups = Selection::new().with("ups_fs", "present");
        let first = assemble(Some(&table), &layout(), &schema(), &sel, &ups);
        for _ in 0..5 {
            assert_eq!(assemble(Some(&table), &layout(), &schema(), &sel, &ups), first);
        }
    }

    #[test]
    fn resolver_order() {
        let names: Vec<&str> = RESOLVERS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["model_override", "row", "selection", "secondary"]);
    }
}
