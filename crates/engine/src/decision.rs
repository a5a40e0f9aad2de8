//! A table paired with its column descriptors.
//!
//! Roles are assigned once, when the decision table is built; the walk
//! iterates descriptors instead of re-checking column lists on every turn.

use liftcheck_core::column::{ColumnDescriptor, ColumnRole};
use liftcheck_core::selection::Selection;
use liftcheck_core::table::Table;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DecisionTable {
    table: Arc<Table>,
    columns: Vec<ColumnDescriptor>,
}

impl DecisionTable {
    /// Tag every column of `table`; columns not named in `roles` are questions.
    pub fn new(table: Arc<Table>, roles: &[(String, ColumnRole)]) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|name| {
                let role = roles
                    .iter()
                    .find(|(c, _)| c == name)
                    .map(|(_, r)| *r)
                    .unwrap_or_default();
                ColumnDescriptor::new(name.clone(), role)
            })
            .collect();
        Self { table, columns }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Role of a column, `None` if the table does not have it.
    pub fn role(&self, column: &str) -> Option<ColumnRole> {
        self.columns.iter().find(|d| d.name == column).map(|d| d.role)
    }

    /// Position of a column in walk order.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|d| d.name == column)
    }

    /// Rows consistent with `selection`.
    ///
    /// Commentary columns, unknown columns and empty values never narrow.
    pub fn candidates(&self, selection: &Selection) -> Table {
        self.table.filter(
            selection
                .iter()
                .filter(|(column, _)| self.role(column).is_some_and(ColumnRole::filters)),
        )
    }
}
