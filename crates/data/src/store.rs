//! The set of tables loaded at startup.
//!
//! Loading is tolerant: a table that is missing or unreadable is recorded
//! as unavailable and the process keeps running. Callers decide what an
//! unavailable table means for them (the decision endpoints answer "not
//! found", the result page degrades to placeholders).

use crate::csv_file::CsvFile;
use crate::registry::EquipmentRegistry;
use liftcheck_config::DataConfig;
use liftcheck_core::error::Error;
use liftcheck_core::source::TableSource;
use liftcheck_core::table::Table;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// A table slot: the loaded table, or why it is unavailable.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    name: &'static str,
    origin: String,
    outcome: Result<Arc<Table>, String>,
}

impl LoadedTable {
    /// Ask `source` for its table, recording failures instead of returning them.
    pub fn load(name: &'static str, source: &dyn TableSource) -> Self {
        let origin = source.describe();
        let outcome = match source.load() {
            Ok(table) => {
                info!(
                    table = name,
                    origin = %origin,
                    rows = table.len(),
                    columns = table.columns().len(),
                    "Table loaded"
                );
                Ok(Arc::new(table))
            }
            Err(e) => {
                match &e {
                    Error::Table(t) if t.is_not_found() => {
                        warn!(table = name, origin = %origin, "Table file not found")
                    }
                    _ => warn!(table = name, origin = %origin, error = %e, "Table unavailable"),
                }
                Err(e.to_string())
            }
        };
        Self {
            name,
            origin,
            outcome,
        }
    }

    /// Wrap an already-built table (tests, fixtures).
    pub fn ready(name: &'static str, table: Table) -> Self {
        Self {
            name,
            origin: "in-memory".into(),
            outcome: Ok(Arc::new(table)),
        }
    }

    /// A slot with nothing in it.
    pub fn missing(name: &'static str) -> Self {
        Self {
            name,
            origin: "none".into(),
            outcome: Err("not loaded".into()),
        }
    }

    pub fn table(&self) -> Option<&Arc<Table>> {
        self.outcome.as_ref().ok()
    }

    pub fn status(&self) -> TableStatus {
        match &self.outcome {
            Ok(table) => TableStatus {
                name: self.name,
                origin: self.origin.clone(),
                available: true,
                rows: table.len(),
                columns: table.columns().len(),
                error: None,
            },
            Err(reason) => TableStatus {
                name: self.name,
                origin: self.origin.clone(),
                available: false,
                rows: 0,
                columns: 0,
                error: Some(reason.clone()),
            },
        }
    }
}

/// Availability summary of one table, for health and status output.
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    pub name: &'static str,
    pub origin: String,
    pub available: bool,
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything read from the data directory.
#[derive(Debug, Clone)]
pub struct TableStore {
    pub primary: LoadedTable,
    pub secondary: LoadedTable,
    pub elevators: LoadedTable,
    registry: EquipmentRegistry,
}

impl TableStore {
    /// Load every configured table. Never fails.
    pub fn load(config: &DataConfig) -> Self {
        let primary = CsvFile::new(
            config.resolve(&config.primary_table),
            &config.primary_table.encodings[..],
        )
        .with_na_values(&config.primary_table.na_values[..]);
        let secondary = CsvFile::new(
            config.resolve(&config.secondary_table),
            &config.secondary_table.encodings[..],
        )
        .with_na_values(&config.secondary_table.na_values[..]);
        let elevators = CsvFile::new(
            config.resolve(&config.elevator_list),
            &config.elevator_list.encodings[..],
        )
        .with_na_values(&config.elevator_list.na_values[..]);
        Self::from_sources(&primary, &secondary, &elevators)
    }

    pub fn from_sources(
        primary: &dyn TableSource,
        secondary: &dyn TableSource,
        elevators: &dyn TableSource,
    ) -> Self {
        Self::from_slots(
            LoadedTable::load("primary", primary),
            LoadedTable::load("secondary", secondary),
            LoadedTable::load("elevators", elevators),
        )
    }

    pub fn from_slots(primary: LoadedTable, secondary: LoadedTable, elevators: LoadedTable) -> Self {
        let registry = elevators
            .table()
            .map(|t| EquipmentRegistry::from_table(Table::clone(t)))
            .unwrap_or_default();
        Self {
            primary,
            secondary,
            elevators,
            registry,
        }
    }

    pub fn registry(&self) -> &EquipmentRegistry {
        &self.registry
    }

    pub fn statuses(&self) -> Vec<TableStatus> {
        vec![
            self.primary.status(),
            self.secondary.status(),
            self.elevators.status(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftcheck_config::TableFileConfig;
    use liftcheck_core::source::StaticSource;

    #[test]
    fn missing_files_are_recorded_not_fatal() {
        let config = DataConfig {
            dir: "/nonexistent/liftcheck".into(),
            ..DataConfig::default()
        };
        let store = TableStore::load(&config);
        assert!(store.primary.table().is_none());
        assert!(store.registry().is_empty());
        let statuses = store.statuses();
        assert_eq!(statuses.len(), 3);
        assert!(statuses.iter().all(|s| !s.available && s.error.is_some()));
    }

    #[test]
    fn loads_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.csv"), "分類,制御盤型式\nA,M1\nA,NA\n").unwrap();
        std::fs::write(
            dir.path().join("list.csv"),
            "管理番号,現場名,メーカー,機種\nE-1,本社,東芝,X\n",
        )
        .unwrap();

        let config = DataConfig {
            dir: dir.path().to_path_buf(),
            primary_table: TableFileConfig {
                path: "main.csv".into(),
                encodings: vec!["utf-8".into()],
                na_values: vec!["NA".into()],
            },
            elevator_list: TableFileConfig {
                path: "list.csv".into(),
                encodings: vec!["utf-8".into(), "cp932".into()],
                na_values: Vec::new(),
            },
            ..DataConfig::default()
        };
        let store = TableStore::load(&config);
        let primary = store.primary.table().unwrap();
        assert_eq!(primary.len(), 2);
        assert_eq!(primary.distinct_non_empty("制御盤型式"), ["M1"]);
        assert!(store.secondary.table().is_none());
        assert_eq!(store.registry().site_name("E-1"), "本社");
    }

    #[test]
    fn static_sources_feed_the_store() {
        let table = Table::from_records(["a"], [vec!["1"]]);
        let source = StaticSource::new("fixture", table);
        let store = TableStore::from_sources(&source, &source, &source);
        let status = store.primary.status();
        assert!(status.available);
        assert_eq!(status.origin, "fixture");
        assert_eq!(status.rows, 1);
    }
}
