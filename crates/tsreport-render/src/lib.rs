//! # tsreport-render
//!
//! Rendering backends for tsreport reports.
//!
//! This crate provides:
//! - Excel timesheet workbooks (summary plus one sheet per employee)
//! - Plain text summary output
//! - The conversion pipeline from a source table to workbook bytes,
//!   synchronously or on a worker thread
//!
//! ## Example
//!
//! ```rust,ignore
//! use tsreport_core::{ReportConfig, Renderer};
//! use tsreport_render::{convert, ExcelRenderer, TextRenderer};
//!
//! // Whole pipeline: table in, xlsx bytes out
//! let bytes = convert(table, &ReportConfig::default())?;
//! std::fs::write("TimeSheet Report.xlsx", bytes)?;
//!
//! // Console summary of an already built report
//! print!("{}", TextRenderer.render(&report)?);
//! ```

pub mod excel;
pub mod pipeline;

pub use excel::{ExcelRenderer, ReportStyles};
pub use pipeline::{convert, convert_or_none, spawn_conversion, ConversionOutcome};

use tsreport_core::report::{SUMMARY_HEADERS, SUMMARY_TOTAL_LABEL};
use tsreport_core::{RenderError, Renderer, Report};

/// Plain text renderer for console output
#[derive(Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, report: &Report) -> Result<String, RenderError> {
        let name_width = report
            .summary
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .chain([SUMMARY_HEADERS[0].len(), SUMMARY_TOTAL_LABEL.len()])
            .max()
            .unwrap_or(0);

        let mut out = format!("Timesheet summary: {}\n\n", report.month);
        out.push_str(&format!(
            "{:<name_width$}  {:>8}  {}\n",
            SUMMARY_HEADERS[0], SUMMARY_HEADERS[1], SUMMARY_HEADERS[2]
        ));
        out.push_str(&format!("{}\n", "-".repeat(name_width + 12 + SUMMARY_HEADERS[2].len())));
        for row in &report.summary.rows {
            out.push_str(&format!("{:<name_width$}  {:>8}  {}\n", row.name, row.hours, row.status));
        }
        out.push('\n');
        out.push_str(&format!(
            "{:<name_width$}  {:>8}\n",
            SUMMARY_TOTAL_LABEL, report.summary.total_hours
        ));
        Ok(out)
    }
}
