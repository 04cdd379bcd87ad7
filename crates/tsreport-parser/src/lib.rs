//! # tsreport-parser
//!
//! Readers that turn timesheet exports into a [`SourceTable`].
//!
//! This crate provides:
//! - CSV reader (`.csv`)
//! - Spreadsheet reader (`.xlsx`, `.xlsm`, `.xls`, `.ods`), first sheet only
//! - Format detection from the file extension
//!
//! Every cell is read as text; interpretation happens in the engine.
//!
//! ## Example
//!
//! ```rust
//! use tsreport_parser::read_csv;
//!
//! let input = "Emp Name,Date,Total Hours\nAlice,\"Jan 05, 2024\",8:00\n";
//! let table = read_csv(input.as_bytes()).unwrap();
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.cell(0, 1), Some("Jan 05, 2024"));
//! ```

pub mod csv;
pub mod spreadsheet;

pub use crate::csv::read_csv;
pub use crate::spreadsheet::read_spreadsheet;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tsreport_core::{SourceTable, TableError};

/// Reading error
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Input file does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Invalid or malformed input file - No extension found.")]
    NoExtension,

    #[error("Invalid file type '{0}', csv | xlsx are supported.")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated text
    Csv,
    /// Excel or OpenDocument workbook
    Spreadsheet,
}

/// Detect the input format from the file extension
pub fn detect_format(path: &Path) -> Result<FileFormat, ReadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .ok_or(ReadError::NoExtension)?;

    match extension.to_ascii_lowercase().as_str() {
        "csv" => Ok(FileFormat::Csv),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileFormat::Spreadsheet),
        other => Err(ReadError::Unsupported(other.to_string())),
    }
}

/// Read a timesheet export from a path (auto-detects format)
pub fn read_file(path: &Path) -> Result<SourceTable, ReadError> {
    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }

    let table = match detect_format(path)? {
        FileFormat::Csv => {
            tracing::info!("csv file type detected");
            read_csv(std::fs::File::open(path)?)?
        }
        FileFormat::Spreadsheet => {
            tracing::info!("spreadsheet file type detected");
            read_spreadsheet(path)?
        }
    };
    tracing::debug!("Total rows found - {}", table.len() + 1);
    Ok(table)
}

/// True when a record carries no text at all
pub(crate) fn is_blank(record: &[Option<String>]) -> bool {
    record
        .iter()
        .all(|cell| cell.as_deref().map_or(true, |c| c.trim().is_empty()))
}
