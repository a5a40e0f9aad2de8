//! Table source trait — abstraction over where a table comes from.
//!
//! Loading is an explicit initialization step: a source is asked once,
//! at startup, and the resulting [`Table`] is injected wherever it is
//! needed. Tests substitute a [`StaticSource`].

use crate::error::Result;
use crate::table::Table;

pub trait TableSource: Send + Sync {
    /// Human-readable origin (file path, "fixture", ...), for logs.
    fn describe(&self) -> String;

    /// Produce the table. Implementations fail rather than return a
    /// partial table; callers decide how to degrade.
    fn load(&self) -> Result<Table>;
}

/// An in-memory source, for tests and embedded fixtures.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    table: Table,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl TableSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Table> {
        Ok(self.table.clone())
    }
}
