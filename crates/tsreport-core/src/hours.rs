//! Hour parsing for `H:MM` duration strings
//!
//! Timesheet exports record worked time as `H:MM`. The report works with
//! decimal hours where the minute part is mapped onto a fixed quarter-hour
//! table:
//!
//! | Minutes | Added |
//! |---------|-------|
//! | 15      | 0.30  |
//! | 30      | 0.50  |
//! | 45      | 0.75  |
//! | other   | 0.00  |
//!
//! The `15 → 0.30` entry is what existing reports show, so it is kept as is.

use thiserror::Error;

/// Error raised when an `H:MM` string has non-numeric parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("Invalid hour value '{value}': '{part}' is not a number")]
    NotANumber { value: String, part: String },
}

/// Parse an `H:MM` string into decimal hours.
///
/// Empty or absent input is zero hours, as is anything that does not split
/// into exactly two colon-separated parts. Non-numeric parts are an error so
/// the caller can choose between defaulting and aborting.
pub fn parse_hours(input: Option<&str>) -> Result<f64, HoursError> {
    let Some(value) = input else {
        return Ok(0.0);
    };
    if value.is_empty() {
        return Ok(0.0);
    }

    let mut parts: Vec<&str> = value.split(':').collect();
    // "8:" and "8::" behave like "8"
    while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    if parts.len() != 2 {
        return Ok(0.0);
    }

    let hours = parse_part(value, parts[0])?;
    let minutes = parse_part(value, parts[1])?;

    Ok(hours + minute_fraction(minutes))
}

/// Parse hours, treating malformed input as zero.
///
/// This is the lenient policy used when aggregating rows: a bad cell logs a
/// warning and contributes nothing.
pub fn parse_hours_or_zero(input: Option<&str>) -> f64 {
    match parse_hours(input) {
        Ok(hours) => hours,
        Err(err) => {
            tracing::warn!("{err}, counting as 0 hours");
            0.0
        }
    }
}

fn parse_part(value: &str, part: &str) -> Result<f64, HoursError> {
    part.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| HoursError::NotANumber {
            value: value.to_string(),
            part: part.to_string(),
        })
}

fn minute_fraction(minutes: f64) -> f64 {
    if minutes == 15.0 {
        0.30
    } else if minutes == 30.0 {
        0.50
    } else if minutes == 45.0 {
        0.75
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_hours() {
        assert_eq!(parse_hours(Some("8:00")), Ok(8.0));
        assert_eq!(parse_hours(Some("0:00")), Ok(0.0));
        assert_eq!(parse_hours(Some("12:00")), Ok(12.0));
    }

    #[test]
    fn quarter_hours() {
        assert_eq!(parse_hours(Some("8:15")), Ok(8.30));
        assert_eq!(parse_hours(Some("8:30")), Ok(8.50));
        assert_eq!(parse_hours(Some("8:45")), Ok(8.75));
    }

    #[test]
    fn other_minutes_are_dropped() {
        assert_eq!(parse_hours(Some("8:10")), Ok(8.0));
        assert_eq!(parse_hours(Some("7:59")), Ok(7.0));
    }

    #[test]
    fn empty_and_absent_are_zero() {
        assert_eq!(parse_hours(Some("")), Ok(0.0));
        assert_eq!(parse_hours(None), Ok(0.0));
    }

    #[test]
    fn wrong_shape_is_zero() {
        assert_eq!(parse_hours(Some("8")), Ok(0.0));
        assert_eq!(parse_hours(Some("8:00:00")), Ok(0.0));
        assert_eq!(parse_hours(Some("8:")), Ok(0.0));
    }

    #[test]
    fn non_numeric_is_error() {
        let err = parse_hours(Some("eight:00")).unwrap_err();
        assert_eq!(
            err,
            HoursError::NotANumber {
                value: "eight:00".into(),
                part: "eight".into()
            }
        );
        assert!(parse_hours(Some("8:xx")).is_err());
        assert!(parse_hours(Some(":30")).is_err());
    }

    #[test]
    fn lenient_policy_defaults_to_zero() {
        assert_eq!(parse_hours_or_zero(Some("abc:15")), 0.0);
        assert_eq!(parse_hours_or_zero(Some("4:30")), 4.5);
    }

    #[test]
    fn no_upper_bound() {
        assert_eq!(parse_hours(Some("100:45")), Ok(100.75));
    }
}
