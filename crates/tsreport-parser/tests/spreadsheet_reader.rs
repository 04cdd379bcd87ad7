//! Integration tests for reading timesheet workbooks

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tsreport_parser::{read_file, read_spreadsheet};

fn write_export(path: &std::path::Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let time_format = Format::new().set_num_format("h:mm");

    for (col, header) in ["Id", "Emp Name", "Project", "Date", "Title", "Description", "Total Hours"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *header).unwrap();
    }

    sheet.write_number(1, 0, 1).unwrap();
    sheet.write_string(1, 1, "Alice").unwrap();
    sheet.write_string(1, 2, "Portal").unwrap();
    sheet
        .write_datetime_with_format(1, 3, &ExcelDateTime::from_ymd(2024, 1, 5).unwrap(), &date_format)
        .unwrap();
    sheet.write_string(1, 4, "'Bugfix").unwrap();
    sheet.write_string(1, 5, "Fix login").unwrap();
    sheet
        .write_datetime_with_format(1, 6, &ExcelDateTime::from_hms(8, 30, 0).unwrap(), &time_format)
        .unwrap();

    sheet.write_number(2, 0, 2).unwrap();
    sheet.write_string(2, 1, "Bob").unwrap();
    sheet.write_string(2, 3, "Jan 08, 2024").unwrap();
    sheet.write_string(2, 6, "4:00").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn reads_first_sheet_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xlsx");
    write_export(&path);

    let table = read_spreadsheet(&path).unwrap();
    assert_eq!(table.header()[1], "Emp Name");
    assert_eq!(table.len(), 2);

    assert_eq!(table.cell(0, 0), Some("1"));
    assert_eq!(table.cell(0, 1), Some("Alice"));
    assert_eq!(table.cell(0, 3), Some("2024-01-05"));
    assert_eq!(table.cell(0, 4), Some("'Bugfix"));
    assert_eq!(table.cell(0, 6), Some("8:30"));

    assert_eq!(table.cell(1, 2), None);
    assert_eq!(table.cell(1, 3), Some("Jan 08, 2024"));
}

#[test]
fn read_file_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xlsx");
    write_export(&path);

    let table = read_file(&path).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn corrupt_workbook_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip file").unwrap();

    assert!(read_spreadsheet(&path).is_err());
}
