//! Immutable in-memory tabular dataset.
//!
//! Every row holds exactly one cell per column; an empty string means
//! "no value". Column order is significant: for decision tables it is the
//! question order.

use std::collections::{BTreeSet, HashSet};

/// An ordered set of uniquely named columns and the rows under them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, normalizing every row to the column count.
    ///
    /// Short rows are padded with empty cells, long rows are truncated.
    /// Duplicate column names get a `.N` suffix so names stay unique.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = unique_column_names(columns);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Convenience constructor for literal data (fixtures, tests).
    pub fn from_records<C, R, V>(columns: C, rows: impl IntoIterator<Item = R>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(
            columns.into_iter().map(Into::into).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if the table has it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    /// Rows where every predicate column equals its value.
    ///
    /// A predicate with an empty value is unconstrained, and so is a
    /// predicate naming a column this table does not have.
    pub fn filter<'p, I>(&self, predicates: I) -> Table
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let constraints: Vec<(usize, &str)> = predicates
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .filter_map(|(column, value)| self.column_index(column).map(|idx| (idx, value)))
            .collect();

        let rows = self
            .rows
            .iter()
            .filter(|cells| constraints.iter().all(|(idx, value)| cells[*idx] == *value))
            .cloned()
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Sorted distinct values of a column, without the empty string.
    ///
    /// An unknown column yields an empty list.
    pub fn distinct_non_empty(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .map(|cells| cells[idx].as_str())
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// A borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell value for a column, `None` if the column does not exist.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.cells[idx].as_str())
    }

    /// Cell value for a column, empty when the column does not exist.
    pub fn value(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

fn unique_column_names(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
    let mut out = Vec::with_capacity(columns.len());
    for name in columns {
        let mut candidate = name.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
