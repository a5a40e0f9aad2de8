//! Error types for the LiftCheck domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Note that the decision engine itself never fails: every lookup degrades
//! to an empty value. Errors only arise at the edges, when loading tables.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The top-level error type for domain operations.
///
/// Configuration errors live with the config crate (`ConfigError`) and are
/// surfaced by the binaries directly.
#[derive(Debug, Error)]
pub enum Error {
    // --- Table errors ---
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Why a backing table could not be made available.
///
/// Callers treat every variant the same way ("table unavailable"); the
/// variants exist for logging and diagnostics.
#[derive(Debug, Clone, Error)]
pub enum TableError {
    #[error("Table file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read table file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Table file {} could not be decoded as any of: {tried}", path.display())]
    Undecodable { path: PathBuf, tried: String },

    #[error("Malformed table file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl TableError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            TableError::NotFound { path }
            | TableError::Unreadable { path, .. }
            | TableError::Undecodable { path, .. }
            | TableError::Malformed { path, .. } => path,
        }
    }

    /// Whether the file was simply absent (as opposed to unreadable).
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::NotFound { .. })
    }
}
