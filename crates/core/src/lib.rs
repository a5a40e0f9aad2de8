//! # LiftCheck Core
//!
//! Domain types and error definitions for the LiftCheck inspection
//! decision engine. This crate has **zero framework dependencies**; it
//! defines the model every other crate works against.
//!
//! ## Design Philosophy
//!
//! A decision table is an ordinary [`Table`] whose column order encodes the
//! question sequence. No tree is materialized: the engine narrows the
//! candidate rows column by column. The types here are:
//! - [`Table`]: the immutable tabular dataset
//! - [`ColumnDescriptor`]: a column name plus its [`ColumnRole`]
//! - [`Selection`]: the client's answered-so-far state
//! - [`StepResult`]: one engine response per protocol turn
//! - [`ResultRecord`]: the grouped final determination
//! - [`TableSource`]: where a table comes from (CSV file, fixture)

pub mod column;
pub mod error;
pub mod record;
pub mod selection;
pub mod source;
pub mod step;
pub mod table;

// Re-export key types at crate root for ergonomics
pub use column::{ColumnDescriptor, ColumnRole};
pub use error::{Error, Result, TableError};
pub use record::{PLACEHOLDER, ResultGroup, ResultRecord, ResultRow};
pub use selection::Selection;
pub use source::{StaticSource, TableSource};
pub use step::{Flow, StepResult};
pub use table::{Row, Table};
