//! # tsreport-core
//!
//! Core domain model and traits for the tsreport timesheet converter.
//!
//! This crate provides:
//! - Source model: `SourceTable`, `ColumnMap`, `SourceRow`
//! - Report model: `Report`, `SummarySheet`, `CalendarSheet`, `DayRow`
//! - Hour parsing (`H:MM` → decimal hours) and date normalization
//! - Configuration, the `Renderer` trait, error types
//!
//! ## Example
//!
//! ```rust
//! use tsreport_core::{hours::parse_hours, dates};
//!
//! assert_eq!(parse_hours(Some("8:45")).unwrap(), 8.75);
//!
//! let date = dates::normalize_date("Jan 05, 2024").unwrap();
//! assert_eq!(dates::format_canonical(date), "05-Jan-2024");
//! assert_eq!(dates::day_of_month("05-Jan-2024").unwrap(), 5);
//! ```

pub mod config;
pub mod dates;
pub mod hours;
pub mod report;
pub mod table;

pub use config::{ColumnNames, ConfigError, ReportConfig, StyleConfig};
pub use dates::DateError;
pub use hours::HoursError;
pub use report::{CalendarSheet, DayRow, Report, ReportMonth, RowMark, SummaryRow, SummarySheet};
pub use table::{ColumnMap, SourceRow, SourceTable};

use thiserror::Error;

/// Unique identifier for an employee (exact, case-sensitive name)
pub type EmployeeKey = String;

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a report to the output format
    fn render(&self, report: &Report) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Structural problems with the source table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Input has no header row")]
    Empty,

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Input has no data rows")]
    NoRows,

    #[error("Reference date cell is empty")]
    MissingReference,

    #[error("Row {row}: no date for {employee}")]
    MissingDate { row: usize, employee: String },

    #[error("Row {row}: {date} has no matching day in {month}")]
    DayOutsideMonth { row: usize, date: String, month: String },

    #[error("Invalid reference date: {0}")]
    Date(#[from] DateError),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Conversion failure
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Malformed date: {0}")]
    Date(#[from] DateError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Conversion worker stopped: {0}")]
    Worker(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConvertError::from(TableError::MissingColumn("Date".into()));
        assert_eq!(err.to_string(), "Missing column: Date");

        let err = ConvertError::from(DateError::NotCanonical("Jan 5".into()));
        assert!(err.to_string().contains("Jan 5"));

        let err = ConvertError::from(RenderError::Format("bad sheet".into()));
        assert_eq!(err.to_string(), "Render failed: Format error: bad sheet");

        let err = TableError::DayOutsideMonth {
            row: 4,
            date: "31-Jan-2024".into(),
            month: "February 2024".into(),
        };
        assert_eq!(err.to_string(), "Row 4: 31-Jan-2024 has no matching day in February 2024");
    }
}
