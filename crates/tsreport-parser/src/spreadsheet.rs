//! Spreadsheet reader (xlsx, xlsm, xls, ods)
//!
//! Only the first sheet is read. Cells are converted to the same text the
//! CSV export would carry:
//! - dates become ISO `YYYY-MM-DD`
//! - time-of-day and duration cells become `H:MM`
//! - integral numbers lose their fractional part

use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use std::path::Path;
use tsreport_core::SourceTable;

use crate::ReadError;

/// Read the first sheet of a workbook into a source table
pub fn read_spreadsheet(path: &Path) -> Result<SourceTable, ReadError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReadError::Spreadsheet(format!("Failed to open {}: {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReadError::Spreadsheet("No sheets found in workbook".into()))?
        .map_err(|e| ReadError::Spreadsheet(e.to_string()))?;

    let records: Vec<Vec<Option<String>>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !crate::is_blank(cells))
        .collect();

    Ok(SourceTable::from_records(records)?)
}

/// Text form of a spreadsheet cell
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_datetime(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("#{e:?}")),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

fn format_datetime(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();
    if dt.is_duration() || (0.0..1.0).contains(&serial) {
        return format_clock(serial);
    }
    dt.as_datetime()
        .map(|datetime| datetime.date().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format_number(serial))
}

/// Fraction of a day as `H:MM`
fn format_clock(days: f64) -> String {
    let minutes = (days * 24.0 * 60.0).round() as i64;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
