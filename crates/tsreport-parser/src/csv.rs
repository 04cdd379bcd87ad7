//! CSV reader
//!
//! The first record is the header. Rows may be ragged and fully blank lines
//! are dropped.

use std::io::Read;
use tsreport_core::SourceTable;

use crate::ReadError;

/// Read a CSV export into a source table
pub fn read_csv<R: Read>(reader: R) -> Result<SourceTable, ReadError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells: Vec<Option<String>> = record.iter().map(|field| Some(field.to_string())).collect();
        if crate::is_blank(&cells) {
            continue;
        }
        records.push(cells);
    }

    Ok(SourceTable::from_records(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_quoted_fields() {
        let input = "Emp Name,Date,Title,Total Hours\n\
                     Alice,\"Jan 05, 2024\",\"Review, docs\",4:30\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 1), Some("Jan 05, 2024"));
        assert_eq!(table.cell(0, 2), Some("Review, docs"));
    }

    #[test]
    fn ragged_rows_are_allowed() {
        let input = "Emp Name,Date,Total Hours\nAlice,2024-01-05\nBob,2024-01-05,1:00,extra\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(1, 3), Some("extra"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "Emp Name,Date,Total Hours\n,,\nAlice,2024-01-05,1:00\n\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 0), Some("Alice"));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, ReadError::Table(_)));
    }
}
