//! Calendar sheet building
//!
//! Each employee gets one row per day of the report month, including days
//! with no source rows at all. Weekends carry no title; weekdays left
//! without a description are stamped with the leave marker.

use chrono::Datelike;
use std::collections::BTreeMap;
use tsreport_core::dates::{format_canonical, is_weekend};
use tsreport_core::{CalendarSheet, DayRow, ReportMonth, RowMark};

use crate::aggregate::DayAggregate;

/// Build the full-month sheet of one employee.
pub fn build_calendar(
    employee: &str,
    month: ReportMonth,
    days: Option<&BTreeMap<u32, DayAggregate>>,
    leave_marker: &str,
) -> CalendarSheet {
    let rows: Vec<DayRow> = month
        .days()
        .map(|date| {
            let day = date.day();
            let aggregate = days.and_then(|d| d.get(&day));
            let weekend = is_weekend(date);

            let title = match aggregate {
                Some(a) if !weekend => a.title_text(),
                _ => String::new(),
            };
            let mut description = aggregate.map(|a| a.description.clone()).unwrap_or_default();

            let mark = if weekend {
                RowMark::Weekend
            } else if description.is_empty() {
                description = leave_marker.to_string();
                RowMark::Leave
            } else {
                RowMark::Workday
            };

            DayRow {
                date,
                date_label: format_canonical(date),
                title,
                description,
                project_time: aggregate.map(|a| a.hours),
                mark,
            }
        })
        .collect();

    let total = total_project_time(employee, &rows);
    CalendarSheet {
        employee: employee.to_string(),
        days: rows,
        total,
    }
}

/// Sum of the project time of every day row.
///
/// Values that are not finite numbers contribute nothing.
pub fn total_project_time(employee: &str, rows: &[DayRow]) -> f64 {
    rows.iter()
        .filter_map(|row| row.project_time)
        .filter(|hours| {
            let usable = hours.is_finite();
            if !usable {
                tracing::warn!("{employee}: project time {hours} is not a number, counted as 0");
            }
            usable
        })
        .sum()
}
