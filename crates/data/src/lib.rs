//! Data loading for LiftCheck.
//!
//! Reads the decision tables and the equipment list from CSV files,
//! trying each configured encoding in turn, and exposes them as immutable
//! [`liftcheck_core::Table`] values. Nothing here fails hard: a table that
//! cannot be read is recorded as unavailable.

pub mod csv_file;
pub mod registry;
pub mod store;

pub use csv_file::{CsvFile, encoding_for_label};
pub use liftcheck_core::source::{StaticSource, TableSource};
pub use registry::{Equipment, EquipmentRegistry, UNKNOWN_SITE};
pub use store::{LoadedTable, TableStatus, TableStore};
