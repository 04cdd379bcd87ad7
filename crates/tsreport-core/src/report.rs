//! Report document model
//!
//! The engine fills these types and renderers turn them into output. A
//! [`Report`] is built fresh for every conversion and owns all its data.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Summary sheet name
pub const SUMMARY_SHEET: &str = "Summary";

/// Summary sheet column headers
pub const SUMMARY_HEADERS: [&str; 3] = ["Names", "Hours", "New/Existing"];

/// Calendar sheet column headers
pub const CALENDAR_HEADERS: [&str; 5] = ["Name", "Date", "Title", "Description", "Project Time"];

/// Label of the summary grand-total row
pub const SUMMARY_TOTAL_LABEL: &str = "Total Hours";

/// Label of the calendar totals row
pub const CALENDAR_TOTAL_LABEL: &str = "Total";

/// Status shown for every employee on the summary sheet
pub const EXISTING_STATUS: &str = "Existing";

/// Calendar month the report covers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReportMonth {
    pub year: i32,
    pub month: u32,
}

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month
    pub fn len_days(&self) -> u32 {
        let first = self.first_day();
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.map(|n| (n - first).num_days() as u32).unwrap_or(31)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .with_day(self.len_days())
            .unwrap_or_else(|| self.first_day())
    }

    /// Every date of the month, ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        let last = self.last_day();
        first.iter_days().take_while(move |d| *d <= last)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// The complete output document
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub month: ReportMonth,
    pub summary: SummarySheet,
    /// One calendar sheet per employee, ascending by name
    pub employees: Vec<CalendarSheet>,
}

/// Summary of total hours per employee
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SummarySheet {
    pub rows: Vec<SummaryRow>,
    /// Grand total accumulated with truncation after every addition
    pub total_hours: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub hours: f64,
    pub status: String,
}

/// Row classification on a calendar sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMark {
    Workday,
    Weekend,
    Leave,
}

/// One calendar day of an employee sheet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    /// Canonical `dd-MMM-yyyy` label
    pub date_label: String,
    pub title: String,
    pub description: String,
    /// Blank when nothing was recorded for the day
    pub project_time: Option<f64>,
    pub mark: RowMark,
}

/// Full-month sheet of one employee
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalendarSheet {
    pub employee: String,
    pub days: Vec<DayRow>,
    pub total: f64,
}
