//! Single-pass aggregation of source rows
//!
//! One walk over the (date-normalized) source table produces both views the
//! report needs:
//!
//! - **Employee totals**: hours per employee, where only the first row seen
//!   for an (employee, day) pair counts.
//! - **Day aggregates**: per employee and day-of-month, the distinct titles,
//!   the merged description and the hours of every row for that day.
//!
//! The two views deliberately disagree when an employee has several rows on
//! one day: the total keeps the first row only, the day sums all of them.
//! Descriptions are merged once per day-token (`description#day`).

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};
use tsreport_core::dates;
use tsreport_core::hours::parse_hours_or_zero;
use tsreport_core::{ColumnMap, ConvertError, EmployeeKey, ReportMonth, SourceRow, SourceTable, TableError};

/// Separator between merged descriptions and titles
pub const JOIN_SEPARATOR: &str = ", ";

/// Everything recorded for one employee on one day of the month
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayAggregate {
    /// Distinct non-empty titles in first-seen order, for rows dated inside
    /// the report month
    pub titles: Vec<String>,
    /// Descriptions merged once per day-token
    pub description: String,
    /// Sum of the hours of every row for the day
    pub hours: f64,
    /// Number of source rows merged into this day
    pub rows: usize,
}

impl DayAggregate {
    fn add_title(&mut self, title: &str) {
        if !title.is_empty() && !self.titles.iter().any(|t| t == title) {
            self.titles.push(title.to_string());
        }
    }

    fn append_description(&mut self, text: &str) {
        if !self.description.is_empty() {
            self.description.push_str(JOIN_SEPARATOR);
        }
        self.description.push_str(text);
    }

    /// Titles joined for display
    pub fn title_text(&self) -> String {
        self.titles.join(JOIN_SEPARATOR)
    }
}

/// Dedup key for description merging
pub fn day_token(description: &str, day: u32) -> String {
    format!("{description}#{day}")
}

#[derive(Debug, Default)]
struct EmployeeDays {
    days: BTreeMap<u32, DayAggregate>,
    tokens: HashSet<String>,
}

/// Result of the aggregation pass
#[derive(Debug)]
pub struct Aggregation {
    month: ReportMonth,
    totals: BTreeMap<EmployeeKey, f64>,
    days: HashMap<EmployeeKey, EmployeeDays>,
}

impl Aggregation {
    /// Aggregate every data row of a date-normalized table.
    ///
    /// `header_name` is the employee column header; rows repeating it are
    /// skipped. A named row without a date, a date cell that is not
    /// canonical, or a day the report month does not have aborts the pass.
    pub fn build(
        table: &SourceTable,
        columns: &ColumnMap,
        month: ReportMonth,
        header_name: &str,
    ) -> Result<Self, ConvertError> {
        let mut aggregation = Self {
            month,
            totals: BTreeMap::new(),
            days: HashMap::new(),
        };
        let mut counted: HashMap<EmployeeKey, HashSet<u32>> = HashMap::new();

        for row in table.rows(columns) {
            let Some(name) = row.name().filter(|n| !n.is_empty() && *n != header_name) else {
                continue;
            };
            let raw_date = row
                .date()
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| TableError::MissingDate {
                    row: row.index() + 1,
                    employee: name.to_string(),
                })?;
            let date = dates::parse_canonical(raw_date)?;
            let day = date.day();
            if day > month.len_days() {
                return Err(TableError::DayOutsideMonth {
                    row: row.index() + 1,
                    date: raw_date.to_string(),
                    month: month.to_string(),
                }
                .into());
            }
            let hours = parse_hours_or_zero(row.hours());

            if row.hours().is_some() && counted.entry(name.to_string()).or_default().insert(day) {
                *aggregation.totals.entry(name.to_string()).or_insert(0.0) += hours;
            }

            aggregation.merge_day(name, &row, date, day, hours);
        }

        tracing::debug!(
            employees = aggregation.totals.len(),
            "aggregated {} rows for {}",
            table.len(),
            aggregation.month
        );
        Ok(aggregation)
    }

    fn merge_day(&mut self, name: &str, row: &SourceRow<'_>, date: NaiveDate, day: u32, hours: f64) {
        let employee = self.days.entry(name.to_string()).or_default();
        let aggregate = employee.days.entry(day).or_default();
        aggregate.rows += 1;
        aggregate.hours += hours;

        if let Some(description) = row.description().filter(|d| !d.is_empty()) {
            if employee.tokens.insert(day_token(description, day)) {
                aggregate.append_description(description);
            }
        }

        if self.month.contains(date) {
            if let Some(title) = row.title() {
                aggregate.add_title(title);
            }
        }
    }

    pub fn month(&self) -> ReportMonth {
        self.month
    }

    /// Hours per employee, ascending by name
    pub fn totals(&self) -> &BTreeMap<EmployeeKey, f64> {
        &self.totals
    }

    /// Employees that get a calendar sheet, ascending by name
    pub fn employees(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }

    /// Day aggregates of one employee keyed by day-of-month
    pub fn days_of(&self, employee: &str) -> Option<&BTreeMap<u32, DayAggregate>> {
        self.days.get(employee).map(|e| &e.days)
    }

    pub fn day(&self, employee: &str, day: u32) -> Option<&DayAggregate> {
        self.days_of(employee)?.get(&day)
    }
}
