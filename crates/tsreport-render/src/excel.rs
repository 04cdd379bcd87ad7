//! Excel timesheet report renderer
//!
//! Generates an XLSX workbook with:
//! - Summary: total hours per employee and a grand total
//! - One sheet per employee: every day of the report month with title,
//!   description and project time, followed by a totals row
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Summary
//! | Names | Hours | New/Existing |
//! |-------|-------|--------------|
//! | Alice | 11.75 | Existing     |
//! | Bob   | 14.5  | Existing     |
//! |       |       |              |
//! | Total Hours | 25 |           |
//!
//! Sheet: Alice
//! | Name  | Date        | Title | Description    | Project Time |
//! |-------|-------------|-------|----------------|--------------|
//! | Alice | 01-Jan-2024 |       | On Leave       |              |   (cyan)
//! | Alice | 06-Jan-2024 |       |                |              |   (weekend)
//! | Alice | 08-Jan-2024 | Login | Fix login page | 8.5          |
//! ...
//! | Total |             |       |                | 16.25        |
//! ```
//!
//! ## Styles
//!
//! All formats are created once per workbook in [`ReportStyles`] and picked by
//! role. Row roles follow [`RowMark`]: weekend rows use the fixed
//! `0x93C47D` fill, leave rows pure cyan.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;
use tsreport_core::report::{
    CALENDAR_HEADERS, CALENDAR_TOTAL_LABEL, SUMMARY_HEADERS, SUMMARY_SHEET, SUMMARY_TOTAL_LABEL,
};
use tsreport_core::{CalendarSheet, RenderError, Renderer, Report, RowMark, StyleConfig, SummarySheet};

/// Header fill (RGB 66,133,244)
pub const HEADER_COLOR: u32 = 0x4285F4;
/// Weekend row fill, kept as the raw application color identifier
pub const WEEKEND_COLOR: u32 = 0x93C47D;
/// Leave row fill (pure cyan)
pub const LEAVE_COLOR: u32 = 0x00FFFF;

/// Longest sheet name Excel accepts
const MAX_SHEET_NAME: usize = 31;

/// Excel timesheet report renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Font used for every cell
    pub font_name: String,
    /// Widths of the Name, Date, Title and Description columns of the
    /// employee sheets, applied after auto-fit
    pub calendar_widths: [f64; 4],
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            font_name: "Calibri".into(),
            calendar_widths: [25.0, 17.0, 20.0, 120.0],
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font name
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the minimum width of the Description column
    pub fn description_width(mut self, width: f64) -> Self {
        self.calendar_widths[3] = width;
        self
    }

    /// Renderer configured from the `[style]` settings
    pub fn from_style(style: &StyleConfig) -> Self {
        Self::new().font(&style.font).description_width(style.description_width)
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, report: &Report) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let styles = ReportStyles::new(&self.font_name);
        let mut used_names = HashSet::new();

        self.add_summary_sheet(&mut workbook, &report.summary, &styles, &mut used_names)?;
        for sheet in &report.employees {
            self.add_calendar_sheet(&mut workbook, sheet, &styles, &mut used_names)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Add the Summary sheet
    fn add_summary_sheet(
        &self,
        workbook: &mut Workbook,
        summary: &SummarySheet,
        styles: &ReportStyles,
        used_names: &mut HashSet<String>,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(sheet_name(SUMMARY_SHEET, used_names))
            .map_err(xlsx)?;
        write_headers(sheet, &SUMMARY_HEADERS, styles)?;

        let mut row = 1u32;
        for entry in &summary.rows {
            sheet
                .write_string_with_format(row, 0, &entry.name, &styles.body)
                .map_err(xlsx)?;
            sheet
                .write_number_with_format(row, 1, entry.hours, &styles.body)
                .map_err(xlsx)?;
            sheet
                .write_string_with_format(row, 2, &entry.status, &styles.body)
                .map_err(xlsx)?;
            row += 1;
        }

        // Bordered blank separator
        for col in 0..SUMMARY_HEADERS.len() as u16 {
            sheet.write_blank(row, col, &styles.body).map_err(xlsx)?;
        }
        row += 1;

        sheet
            .write_string_with_format(row, 0, SUMMARY_TOTAL_LABEL, &styles.total)
            .map_err(xlsx)?;
        sheet
            .write_number_with_format(row, 1, summary.total_hours as f64, &styles.total)
            .map_err(xlsx)?;
        sheet.write_blank(row, 2, &styles.total).map_err(xlsx)?;

        sheet.autofit();
        Ok(())
    }

    /// Add one employee calendar sheet
    fn add_calendar_sheet(
        &self,
        workbook: &mut Workbook,
        calendar: &CalendarSheet,
        styles: &ReportStyles,
        used_names: &mut HashSet<String>,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(sheet_name(&calendar.employee, used_names))
            .map_err(xlsx)?;
        write_headers(sheet, &CALENDAR_HEADERS, styles)?;

        let mut row = 1u32;
        for day in &calendar.days {
            let format = styles.for_mark(day.mark);
            sheet
                .write_string_with_format(row, 0, &calendar.employee, format)
                .map_err(xlsx)?;
            sheet
                .write_string_with_format(row, 1, &day.date_label, format)
                .map_err(xlsx)?;
            write_text_or_blank(sheet, row, 2, &day.title, format)?;
            write_text_or_blank(sheet, row, 3, &day.description, format)?;
            match day.project_time {
                Some(hours) => sheet.write_number_with_format(row, 4, hours, format),
                None => sheet.write_blank(row, 4, format),
            }
            .map_err(xlsx)?;
            row += 1;
        }

        // Unformatted blank separator, then the totals row
        row += 1;
        sheet
            .write_string_with_format(row, 0, CALENDAR_TOTAL_LABEL, &styles.total)
            .map_err(xlsx)?;
        for col in 1..4u16 {
            sheet.write_blank(row, col, &styles.total).map_err(xlsx)?;
        }
        sheet
            .write_number_with_format(row, 4, calendar.total, &styles.total)
            .map_err(xlsx)?;

        sheet.autofit();
        for (col, width) in self.calendar_widths.iter().enumerate() {
            sheet.set_column_width(col as u16, *width).ok();
        }
        Ok(())
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError> {
        if report.employees.is_empty() {
            return Err(RenderError::InvalidData("No employees to render".into()));
        }
        self.render_to_bytes(report)
    }
}

/// Reusable formats, one per visual role
pub struct ReportStyles {
    pub header: Format,
    pub body: Format,
    pub weekend: Format,
    pub leave: Format,
    pub total: Format,
}

impl ReportStyles {
    pub fn new(font_name: &str) -> Self {
        let body = Format::new()
            .set_font_name(font_name)
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        let header = Format::new()
            .set_font_name(font_name)
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_background_color(HEADER_COLOR);

        let weekend = body.clone().set_background_color(WEEKEND_COLOR);
        let leave = body.clone().set_background_color(LEAVE_COLOR);

        let total = Format::new()
            .set_font_name(font_name)
            .set_bold()
            .set_align(FormatAlign::Left);

        Self {
            header,
            body,
            weekend,
            leave,
            total,
        }
    }

    /// Row format for a calendar row classification
    pub fn for_mark(&self, mark: RowMark) -> &Format {
        match mark {
            RowMark::Workday => &self.body,
            RowMark::Weekend => &self.weekend,
            RowMark::Leave => &self.leave,
        }
    }
}

fn xlsx(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], styles: &ReportStyles) -> Result<(), RenderError> {
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &styles.header)
            .map_err(xlsx)?;
    }
    Ok(())
}

fn write_text_or_blank(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    text: &str,
    format: &Format,
) -> Result<(), RenderError> {
    if text.is_empty() {
        sheet.write_blank(row, col, format).map_err(xlsx)?;
    } else {
        sheet.write_string_with_format(row, col, text, format).map_err(xlsx)?;
    }
    Ok(())
}

/// A sheet name Excel accepts, unique within the workbook.
///
/// Forbidden characters become `_`, names are cut to 31 characters, and a
/// ` (n)` suffix separates names that collide case-insensitively.
pub fn sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim();
    let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

    let mut candidate: String = base.chars().take(MAX_SHEET_NAME).collect();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsreport_core::{DayRow, ReportMonth, SummaryRow};

    fn create_test_report() -> Report {
        let month = ReportMonth::new(2024, 1).unwrap();
        let days = month
            .days()
            .map(|date| DayRow {
                date,
                date_label: tsreport_core::dates::format_canonical(date),
                title: String::new(),
                description: "Work".into(),
                project_time: Some(8.0),
                mark: if tsreport_core::dates::is_weekend(date) {
                    RowMark::Weekend
                } else {
                    RowMark::Workday
                },
            })
            .collect();

        Report {
            month,
            summary: SummarySheet {
                rows: vec![SummaryRow {
                    name: "Alice".into(),
                    hours: 8.0,
                    status: "Existing".into(),
                }],
                total_hours: 8,
            },
            employees: vec![CalendarSheet {
                employee: "Alice".into(),
                days,
                total: 248.0,
            }],
        }
    }

    #[test]
    fn excel_renderer_creation() {
        let renderer = ExcelRenderer::new();
        assert_eq!(renderer.font_name, "Calibri");
        assert_eq!(renderer.calendar_widths[3], 120.0);
    }

    #[test]
    fn excel_renderer_with_options() {
        let renderer = ExcelRenderer::new().font("Arial").description_width(80.0);
        assert_eq!(renderer.font_name, "Arial");
        assert_eq!(renderer.calendar_widths[3], 80.0);
    }

    #[test]
    fn excel_renderer_from_style() {
        let style = StyleConfig {
            font: "Verdana".into(),
            description_width: 90.0,
        };
        let renderer = ExcelRenderer::from_style(&style);
        assert_eq!(renderer.font_name, "Verdana");
        assert_eq!(renderer.calendar_widths, [25.0, 17.0, 20.0, 90.0]);

        let defaults = ExcelRenderer::from_style(&StyleConfig::default());
        assert_eq!(defaults.font_name, ExcelRenderer::new().font_name);
        assert_eq!(defaults.calendar_widths, ExcelRenderer::new().calendar_widths);
    }

    #[test]
    fn excel_produces_valid_output() {
        let bytes = ExcelRenderer::new().render(&create_test_report()).unwrap();
        // XLSX files start with PK (ZIP header)
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn excel_without_employees_fails() {
        let mut report = create_test_report();
        report.employees.clear();
        assert!(ExcelRenderer::new().render(&report).is_err());
        // the raw byte renderer still writes a summary-only workbook
        assert!(ExcelRenderer::new().render_to_bytes(&report).is_ok());
    }

    #[test]
    fn styles_by_mark() {
        let styles = ReportStyles::new("Calibri");
        assert!(std::ptr::eq(styles.for_mark(RowMark::Workday), &styles.body));
        assert!(std::ptr::eq(styles.for_mark(RowMark::Weekend), &styles.weekend));
        assert!(std::ptr::eq(styles.for_mark(RowMark::Leave), &styles.leave));
    }

    #[test]
    fn sheet_names_are_sanitized() {
        let mut used = HashSet::new();
        assert_eq!(sheet_name("Summary", &mut used), "Summary");
        assert_eq!(sheet_name("R&D / Ops: Team?", &mut used), "R&D _ Ops_ Team_");
        assert_eq!(sheet_name("'quoted'", &mut used), "quoted");
        assert_eq!(sheet_name("", &mut used), "Sheet");
        assert_eq!(sheet_name(" 'Bob", &mut used), "Bob");
        assert_eq!(sheet_name("Ann' ", &mut used), "Ann");
    }

    #[test]
    fn sheet_names_are_unique_and_short() {
        let mut used = HashSet::new();
        sheet_name("Summary", &mut used);
        assert_eq!(sheet_name("summary", &mut used), "summary (2)");

        let long = "Maximilian Alexander Featherstonehaugh";
        let first = sheet_name(long, &mut used);
        let second = sheet_name(long, &mut used);
        assert_eq!(first.chars().count(), 31);
        assert_eq!(second.chars().count(), 31);
        assert!(second.ends_with(" (2)"));
        assert_ne!(first, second);
    }
}
