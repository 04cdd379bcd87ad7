//! # tsreport-engine
//!
//! Core transformation from a raw source table to a [`Report`].
//!
//! This crate provides:
//! - Date normalization of the whole table and report month detection
//! - Single-pass aggregation (employee totals and per-day aggregates)
//! - Calendar sheet building (one row per day, weekend and leave marking)
//! - Summary sheet building
//!
//! ## Example
//!
//! ```rust
//! use tsreport_core::{ReportConfig, SourceTable};
//! use tsreport_engine::ReportEngine;
//!
//! let row = |cells: &[&str]| cells.iter().map(|c| Some(c.to_string())).collect::<Vec<_>>();
//! let mut table = SourceTable::from_records(vec![
//!     row(&["Emp Name", "Date", "Title", "Description", "Total Hours"]),
//!     row(&["Alice", "Jan 08, 2024", "Bugfix", "Fix login", "8:00"]),
//! ])
//! .unwrap();
//!
//! let report = ReportEngine::new(ReportConfig::default()).build(&mut table).unwrap();
//! assert_eq!(report.summary.rows[0].name, "Alice");
//! assert_eq!(report.employees[0].days.len(), 31);
//! ```

pub mod aggregate;
pub mod calendar;
pub mod summary;

pub use aggregate::{Aggregation, DayAggregate};
pub use calendar::build_calendar;
pub use summary::build_summary;

use tsreport_core::{ConvertError, Report, ReportConfig, ReportMonth, SourceTable, TableError};

/// Builds report documents from source tables
#[derive(Clone, Debug, Default)]
pub struct ReportEngine {
    pub config: ReportConfig,
}

impl ReportEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Transform a source table into a report.
    ///
    /// Date cells of `table` are rewritten to the canonical form in place.
    pub fn build(&self, table: &mut SourceTable) -> Result<Report, ConvertError> {
        let columns = table.columns(&self.config.columns)?;
        if table.is_empty() {
            return Err(TableError::NoRows.into());
        }

        let month = ReportMonth::from_date(table.reference_date(&columns)?);
        let rewritten = table.normalize_dates(&columns)?;
        tracing::debug!("normalized {rewritten} date cells, report month {month}");

        let aggregation = Aggregation::build(table, &columns, month, &self.config.columns.name)?;
        let summary = build_summary(aggregation.totals());
        let employees = aggregation
            .employees()
            .map(|name| build_calendar(name, month, aggregation.days_of(name), &self.config.leave_marker))
            .collect();

        Ok(Report {
            month,
            summary,
            employees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells.iter().map(|c| Some((*c).to_string())).collect()
    }

    #[test]
    fn engine_creation() {
        let engine = ReportEngine::default();
        assert_eq!(engine.config.leave_marker, "On Leave");
    }

    #[test]
    fn header_only_table_has_no_rows() {
        let mut table = SourceTable::from_records(vec![row(&["Emp Name", "Date", "Total Hours"])]).unwrap();
        let err = ReportEngine::default().build(&mut table).unwrap_err();
        assert!(matches!(err, ConvertError::Table(TableError::NoRows)));
    }

    #[test]
    fn missing_column_fails() {
        let mut table = SourceTable::from_records(vec![row(&["Name", "Date", "Total Hours"])]).unwrap();
        let err = ReportEngine::default().build(&mut table).unwrap_err();
        assert!(matches!(err, ConvertError::Table(TableError::MissingColumn(_))));
    }

    #[test]
    fn bad_reference_date_fails() {
        let mut table = SourceTable::from_records(vec![
            row(&["Emp Name", "Date", "Total Hours"]),
            row(&["Alice", "whenever", "1:00"]),
        ])
        .unwrap();
        let err = ReportEngine::default().build(&mut table).unwrap_err();
        assert!(matches!(err, ConvertError::Table(TableError::Date(_))));
    }

    #[test]
    fn dates_are_rewritten_in_place() {
        let mut table = SourceTable::from_records(vec![
            row(&["Emp Name", "Date", "Total Hours"]),
            row(&["Alice", "Mar 04, 2024", "1:00"]),
        ])
        .unwrap();
        let report = ReportEngine::default().build(&mut table).unwrap();
        assert_eq!(table.cell(0, 1), Some("04-Mar-2024"));
        assert_eq!(report.month, ReportMonth::new(2024, 3).unwrap());
    }
}
