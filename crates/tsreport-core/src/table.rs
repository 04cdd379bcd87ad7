//! In-memory source table
//!
//! A [`SourceTable`] holds the raw export as strings: one header row plus
//! data rows, with absent cells as `None`. Columns are located once by name
//! through a [`ColumnMap`], and rows are read through borrowed
//! [`SourceRow`] views.

use crate::config::ColumnNames;
use crate::dates::{self, DateError};
use crate::TableError;
use chrono::NaiveDate;

/// Raw tabular input: header plus data rows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceTable {
    header: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl SourceTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { header, rows }
    }

    /// Build a table from records where the first record is the header.
    pub fn from_records<I>(records: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let mut records = records.into_iter();
        let header = records
            .next()
            .ok_or(TableError::Empty)?
            .into_iter()
            .map(|cell| cell.unwrap_or_default())
            .collect();
        Ok(Self::new(header, records.collect()))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell of a data row; row 0 is the first row after the header
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    /// Resolve the report columns against the header row.
    pub fn columns(&self, names: &ColumnNames) -> Result<ColumnMap, TableError> {
        ColumnMap::resolve(&self.header, names)
    }

    /// Iterate data rows through the resolved columns.
    pub fn rows<'a>(&'a self, columns: &'a ColumnMap) -> impl Iterator<Item = SourceRow<'a>> + 'a {
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, cells)| SourceRow {
                index,
                cells,
                columns,
            })
    }

    /// Rewrite every date cell into the canonical `dd-MMM-yyyy` form.
    ///
    /// Blank or absent date cells are left untouched. Returns the number of
    /// cells rewritten.
    pub fn normalize_dates(&mut self, columns: &ColumnMap) -> Result<usize, DateError> {
        let mut rewritten = 0;
        for cells in &mut self.rows {
            let Some(Some(cell)) = cells.get_mut(columns.date) else {
                continue;
            };
            if cell.trim().is_empty() {
                continue;
            }
            let date = dates::normalize_date(cell)?;
            *cell = dates::format_canonical(date);
            rewritten += 1;
        }
        Ok(rewritten)
    }

    /// Date in the reference cell (first data row, date column).
    ///
    /// The report month and year come from this cell.
    pub fn reference_date(&self, columns: &ColumnMap) -> Result<NaiveDate, TableError> {
        let raw = self
            .cell(0, columns.date)
            .filter(|value| !value.trim().is_empty())
            .ok_or(TableError::MissingReference)?;
        dates::normalize_date(raw).map_err(TableError::from)
    }
}

/// Column positions resolved from the header row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub date: usize,
    pub title: Option<usize>,
    pub description: Option<usize>,
    pub hours: usize,
}

impl ColumnMap {
    /// Position used for titles when the header has no title column
    pub const FALLBACK_TITLE_INDEX: usize = 4;

    pub fn resolve(header: &[String], names: &ColumnNames) -> Result<Self, TableError> {
        let find = |wanted: &str| header.iter().position(|h| h == wanted);
        let require = |wanted: &str| find(wanted).ok_or_else(|| TableError::MissingColumn(wanted.to_string()));

        let name = require(names.name.as_str())?;
        let date = require(names.date.as_str())?;
        let hours = require(names.hours.as_str())?;
        let title = find(names.title.as_str()).or_else(|| {
            let fallback = Self::FALLBACK_TITLE_INDEX;
            (fallback < header.len() && ![name, date, hours].contains(&fallback)).then_some(fallback)
        });
        let description = find(names.description.as_str());

        Ok(Self {
            name,
            date,
            title,
            description,
            hours,
        })
    }
}

/// Borrowed view of one data row
#[derive(Clone, Copy, Debug)]
pub struct SourceRow<'a> {
    index: usize,
    cells: &'a [Option<String>],
    columns: &'a ColumnMap,
}

impl<'a> SourceRow<'a> {
    /// Position among the data rows
    pub fn index(&self) -> usize {
        self.index
    }

    fn get(&self, column: usize) -> Option<&'a str> {
        self.cells.get(column)?.as_deref()
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get(self.columns.name)
    }

    pub fn date(&self) -> Option<&'a str> {
        self.get(self.columns.date)
    }

    /// Title with a leading `'` escape removed
    pub fn title(&self) -> Option<&'a str> {
        let raw = self.get(self.columns.title?)?;
        Some(raw.strip_prefix('\'').unwrap_or(raw))
    }

    pub fn description(&self) -> Option<&'a str> {
        self.get(self.columns.description?)
    }

    pub fn hours(&self) -> Option<&'a str> {
        self.get(self.columns.hours)
    }
}
