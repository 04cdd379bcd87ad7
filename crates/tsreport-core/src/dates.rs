//! Date normalization
//!
//! Source exports carry dates in whatever shape the tracking tool produced:
//! `Jan 05, 2024`, `2024-01-05`, `Fri, 5 January 2024`, `1/5/24`, even
//! `yesterday`. Everything is normalized once into the canonical
//! `dd-MMM-yyyy` form (`05-Jan-2024`), and [`day_of_month`] reads the day
//! back out of that canonical form only.
//!
//! Extraction is regex based: every supported phrasing is searched in the
//! text and the earliest match wins (the longest one on a tie).

use chrono::{Datelike, Local, NaiveDate};
use regex::{Captures, Regex};
use std::sync::OnceLock;
use thiserror::Error;

/// `chrono` format string of the canonical date form
pub const CANONICAL_FORMAT: &str = "%d-%b-%Y";

/// Date parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("No date found in '{0}'")]
    Unrecognized(String),

    #[error("Invalid date format: '{0}' (expected dd-MMM-yyyy)")]
    NotCanonical(String),
}

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

#[derive(Clone, Copy, Debug)]
enum Phrase {
    /// 2024-01-05, 2024/01/05, 2024-01-05T00:00:00
    Iso,
    /// 05-Jan-2024, 5 January 2024, 5th Jan, 2024
    DayMonthYear,
    /// Jan 05, 2024, January 5th 2024
    MonthDayYear,
    /// 1/5/2024, 1/5/24 (month first)
    UsNumeric,
    /// Jan 5
    MonthDay,
    /// 5 Jan
    DayMonth,
    /// today, yesterday, tomorrow
    Relative,
}

struct DatePatterns {
    phrases: Vec<(Phrase, Regex)>,
}

impl DatePatterns {
    fn new() -> Self {
        let build = |pattern: String| Regex::new(&format!("(?i){pattern}")).expect("valid date pattern");
        let phrases = vec![
            (
                Phrase::Iso,
                build(r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})(?:T|\b)".to_string()),
            ),
            (
                Phrase::DayMonthYear,
                build(format!(
                    r"\b(\d{{1,2}})(?:st|nd|rd|th)?[\s\-/.]+({MONTHS})\b\.?,?[\s\-/.]+(\d{{4}}|\d{{2}})\b"
                )),
            ),
            (
                Phrase::MonthDayYear,
                build(format!(
                    r"\b({MONTHS})\b\.?[\s\-]+(\d{{1,2}})(?:st|nd|rd|th)?,?[\s\-]+(\d{{4}})\b"
                )),
            ),
            (
                Phrase::UsNumeric,
                build(r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b".to_string()),
            ),
            (
                Phrase::MonthDay,
                build(format!(r"\b({MONTHS})\b\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b")),
            ),
            (
                Phrase::DayMonth,
                build(format!(r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})\b")),
            ),
            (
                Phrase::Relative,
                build(r"\b(today|yesterday|tomorrow)\b".to_string()),
            ),
        ];
        Self { phrases }
    }
}

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(DatePatterns::new)
}

/// Extract the first calendar date mentioned in `text`.
///
/// Relative words and year-less dates resolve against the local date.
pub fn normalize_date(text: &str) -> Result<NaiveDate, DateError> {
    normalize_date_relative_to(text, Local::now().date_naive())
}

/// Same as [`normalize_date`] with an explicit reference date.
pub fn normalize_date_relative_to(text: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let mut best: Option<(usize, usize, NaiveDate)> = None;

    for (phrase, regex) in &patterns().phrases {
        for caps in regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(date) = resolve(*phrase, &caps, today) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((start, len, _)) => {
                    whole.start() < start || (whole.start() == start && whole.len() > len)
                }
            };
            if better {
                best = Some((whole.start(), whole.len(), date));
            }
            // later matches of the same phrase cannot start earlier
            break;
        }
    }

    best.map(|(_, _, date)| date)
        .ok_or_else(|| DateError::Unrecognized(text.to_string()))
}

fn resolve(phrase: Phrase, caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    let month = |i: usize| caps.get(i).and_then(|m| month_number(m.as_str()));
    let year = |i: usize| {
        let raw = caps.get(i)?.as_str();
        let value = raw.parse::<i32>().ok()?;
        Some(if raw.len() == 2 { 2000 + value } else { value })
    };

    match phrase {
        Phrase::Iso => NaiveDate::from_ymd_opt(year(1)?, num(2)?, num(3)?),
        Phrase::DayMonthYear => NaiveDate::from_ymd_opt(year(3)?, month(2)?, num(1)?),
        Phrase::MonthDayYear => NaiveDate::from_ymd_opt(year(3)?, month(1)?, num(2)?),
        Phrase::UsNumeric => NaiveDate::from_ymd_opt(year(3)?, num(1)?, num(2)?),
        Phrase::MonthDay => NaiveDate::from_ymd_opt(today.year(), month(1)?, num(2)?),
        Phrase::DayMonth => NaiveDate::from_ymd_opt(today.year(), month(2)?, num(1)?),
        Phrase::Relative => match caps.get(1)?.as_str().to_ascii_lowercase().as_str() {
            "today" => Some(today),
            "yesterday" => today.pred_opt(),
            "tomorrow" => today.succ_opt(),
            _ => None,
        },
    }
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Render a date in the canonical `dd-MMM-yyyy` form.
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Parse a canonical `dd-MMM-yyyy` string back into a date.
pub fn parse_canonical(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value, CANONICAL_FORMAT)
        .map_err(|_| DateError::NotCanonical(value.to_string()))
}

/// Day of month of a canonical `dd-MMM-yyyy` string.
///
/// Only canonical input is accepted; every date cell must have been
/// normalized before this runs.
pub fn day_of_month(canonical: &str) -> Result<u32, DateError> {
    parse_canonical(canonical).map(|date| date.day())
}

/// Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}
