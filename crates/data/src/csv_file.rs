//! CSV-backed table source with encoding fallback.
//!
//! The file is read as bytes and decoded with each candidate encoding in
//! turn; the first encoding that decodes the whole file without
//! replacement characters wins. A UTF-8 byte-order mark is stripped.
//!
//! The header row names the columns; a file without one is malformed.
//! Ragged rows are accepted and normalized by [`Table::new`]. Cells equal
//! to one of the configured missing-value tokens (`NA`, `NULL`, ...) are
//! read as empty.

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use liftcheck_core::error::{Result, TableError};
use liftcheck_core::source::TableSource;
use liftcheck_core::table::Table;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    encodings: Vec<&'static Encoding>,
    na_values: Vec<String>,
}

impl CsvFile {
    /// Create a source for `path`, trying `encodings` (labels) in order.
    ///
    /// Unknown labels are skipped with a warning. With no usable label the
    /// file is read as UTF-8.
    pub fn new<S: AsRef<str>>(path: impl Into<PathBuf>, encodings: &[S]) -> Self {
        let path = path.into();
        let mut resolved: Vec<&'static Encoding> = encodings
            .iter()
            .filter_map(|label| {
                let found = encoding_for_label(label.as_ref());
                if found.is_none() {
                    warn!(label = label.as_ref(), path = %path.display(), "Unknown encoding label ignored");
                }
                found
            })
            .collect();
        if resolved.is_empty() {
            resolved.push(UTF_8);
        }
        Self {
            path,
            encodings: resolved,
            na_values: Vec::new(),
        }
    }

    /// Read cells equal to any of `tokens` as empty. Header names are kept.
    pub fn with_na_values<S: AsRef<str>>(mut self, tokens: &[S]) -> Self {
        self.na_values = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        for encoding in &self.encodings {
            if let Some(text) = decode_strict(bytes, encoding) {
                debug!(path = %self.path.display(), encoding = encoding.name(), "Table decoded");
                return Ok(text);
            }
        }
        Err(TableError::Undecodable {
            path: self.path.clone(),
            tried: self
                .encodings
                .iter()
                .map(|e| e.name())
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into())
    }

    fn parse(&self, text: &str) -> Result<Table> {
        let malformed = |e: csv::Error| TableError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(malformed)?
            .iter()
            .map(str::to_string)
            .collect();
        if columns.is_empty() {
            return Err(TableError::Malformed {
                path: self.path.clone(),
                reason: "no header row".into(),
            }
            .into());
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            rows.push(record.iter().map(|cell| self.cell(cell)).collect());
        }

        Ok(Table::new(columns, rows))
    }

    fn cell(&self, raw: &str) -> String {
        if self.na_values.iter().any(|na| na == raw) {
            String::new()
        } else {
            raw.to_string()
        }
    }
}

impl TableSource for CsvFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Table> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TableError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                TableError::Unreadable {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
            }
        })?;
        let text = self.decode(&bytes)?;
        self.parse(&text)
    }
}

/// Resolve a WHATWG label, plus the Python-style aliases found in older
/// configs (`cp932`, `utf-8-sig`).
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    match label.trim().to_ascii_lowercase().as_str() {
        "cp932" => Some(SHIFT_JIS),
        "utf-8-sig" | "utf8-sig" => Some(UTF_8),
        other => Encoding::for_label(other.as_bytes()),
    }
}

fn decode_strict(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    if encoding == UTF_8 {
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        return std::str::from_utf8(body).ok().map(str::to_string);
    }
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}
