//! Conversion pipeline: source table in, workbook bytes out.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use tsreport_core::{ConvertError, Renderer, ReportConfig, SourceTable};
use tsreport_engine::ReportEngine;

use crate::excel::ExcelRenderer;

/// Convert a source table into xlsx bytes.
pub fn convert(mut table: SourceTable, config: &ReportConfig) -> Result<Vec<u8>, ConvertError> {
    tracing::debug!("converting {} rows", table.len());
    let report = ReportEngine::new(config.clone()).build(&mut table)?;
    tracing::info!(
        "report for {}: {} employees, {} total hours",
        report.month,
        report.employees.len(),
        report.summary.total_hours
    );
    Ok(ExcelRenderer::from_style(&config.style).render(&report)?)
}

/// Convert, logging any failure and yielding `None` in its place.
pub fn convert_or_none(table: SourceTable, config: &ReportConfig) -> Option<Vec<u8>> {
    match convert(table, config) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::error!("report generation failed: {e}");
            None
        }
    }
}

/// Result delivered by a background conversion
#[derive(Debug)]
pub enum ConversionOutcome {
    Completed(Vec<u8>),
    Failed(String),
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(bytes) if !bytes.is_empty())
    }

    /// Workbook bytes of a successful conversion
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Completed(bytes) if !bytes.is_empty() => Some(bytes),
            _ => None,
        }
    }
}

/// Run [`convert`] on a worker thread.
///
/// Exactly one outcome is sent on the returned channel.
pub fn spawn_conversion(
    table: SourceTable,
    config: ReportConfig,
) -> Result<Receiver<ConversionOutcome>, ConvertError> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("tsreport-convert".into())
        .spawn(move || {
            let outcome = match convert(table, &config) {
                Ok(bytes) => ConversionOutcome::Completed(bytes),
                Err(e) => ConversionOutcome::Failed(e.to_string()),
            };
            // receiver dropped: nobody is waiting
            tx.send(outcome).ok();
        })
        .map_err(|e| ConvertError::Worker(e.to_string()))?;
    Ok(rx)
}

/// Block until a background conversion reports back.
pub fn wait(rx: &Receiver<ConversionOutcome>) -> Result<Vec<u8>, ConvertError> {
    match rx.recv() {
        Ok(ConversionOutcome::Completed(bytes)) => Ok(bytes),
        Ok(ConversionOutcome::Failed(message)) => Err(ConvertError::Worker(message)),
        Err(e) => Err(ConvertError::Worker(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsreport_core::TableError;

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells.iter().map(|c| Some((*c).to_string())).collect()
    }

    fn sample_table() -> SourceTable {
        SourceTable::from_records(vec![
            row(&["Emp Name", "Date", "Title", "Description", "Total Hours"]),
            row(&["Alice", "Jan 08, 2024", "Login", "Fix login page", "8:00"]),
            row(&["Bob", "Jan 09, 2024", "Deploy", "Ship release", "6:30"]),
        ])
        .unwrap()
    }

    #[test]
    fn convert_produces_xlsx() {
        let bytes = convert(sample_table(), &ReportConfig::default()).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn convert_missing_column() {
        let table = SourceTable::from_records(vec![row(&["Name", "Date"]), row(&["Alice", "2024-01-08"])]).unwrap();
        let err = convert(table, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Table(TableError::MissingColumn(_))));
    }

    #[test]
    fn convert_or_none_swallows_errors() {
        let table = SourceTable::from_records(vec![row(&["Emp Name", "Date", "Total Hours"])]).unwrap();
        assert!(convert_or_none(table, &ReportConfig::default()).is_none());
        assert!(convert_or_none(sample_table(), &ReportConfig::default()).is_some());
    }

    #[test]
    fn background_conversion_succeeds() {
        let rx = spawn_conversion(sample_table(), ReportConfig::default()).unwrap();
        let outcome = rx.recv().unwrap();
        assert!(outcome.is_success());
        assert!(outcome.into_bytes().is_some());
    }

    #[test]
    fn background_conversion_reports_failure() {
        let table = SourceTable::from_records(vec![
            row(&["Emp Name", "Date", "Total Hours"]),
            row(&["Alice", "someday", "1:00"]),
        ])
        .unwrap();
        let rx = spawn_conversion(table, ReportConfig::default()).unwrap();
        let err = wait(&rx).unwrap_err();
        assert!(matches!(err, ConvertError::Worker(_)));
        assert!(err.to_string().contains("someday"));
    }
}
