// SPDX-License-Identifier: MIT

//!
//! Parsing of the date strings found in event documents and configuration
//!

use crate::{MAX_DATE_TIME, MIN_DATE_TIME};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Datetime formats tried in order
const DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
];

/// Date only formats tried in order (midnight is assumed)
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Errors that can arise when parsing a date string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// A 4 character year that isn't a number in `1..=9999`
    #[error("Year `{0}` is not allowed")]
    InvalidYear(String),

    /// None of the known formats match
    #[error("Date `{0}` is not in a recognised format")]
    Unrecognised(String),
}

/// Parse a date string, resolving `today`, `now`, etc, against the local clock
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, DateParseError> {
    parse_date_time_relative_to(value, Local::now().naive_local())
}

/// Parse a date string.  Accepts:
///
/// - `today`, `tomorrow`, `yesterday` (midnight) and `now`, relative to `now`
/// - a 4 character year (1st Jan of that year)
/// - ISO 8601 (`1990-03-17`, `1990-03-17T10:25:00`)
/// - US style (`03/17/1990`, `03/17/1990 10:25:00 AM`)
/// - month names (`Mar 17 1990`, `March 17, 1990`)
pub fn parse_date_time_relative_to(
    value: &str,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, DateParseError> {
    let value = value.trim();
    let today = now.date().and_time(NaiveTime::MIN);

    match value.to_lowercase().as_str() {
        "now" => return Ok(now),
        "today" => return Ok(today),
        "tomorrow" => return Ok(add_days_clamped(today, 1)),
        "yesterday" => return Ok(add_days_clamped(today, -1)),
        _ => (),
    }

    if value.len() == 4 {
        return parse_year(value);
    }

    if let Some(date_time) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(date_time);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| DateParseError::Unrecognised(value.to_string()))
}

/// Parse a year (e.g. `1990`) as midnight on the 1st of January
pub fn parse_year(value: &str) -> Result<NaiveDateTime, DateParseError> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (1..=9999).contains(year))
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| DateParseError::InvalidYear(value.to_string()))
}

fn add_days_clamped(date: NaiveDateTime, days: i64) -> NaiveDateTime {
    match date.checked_add_signed(Duration::days(days)) {
        Some(date) => date.clamp(*MIN_DATE_TIME, *MAX_DATE_TIME),
        None if days < 0 => *MIN_DATE_TIME,
        None => *MAX_DATE_TIME,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn relative_words() {
        let now = datetime(2024, 5, 10, 13, 45);
        let parse = |value| parse_date_time_relative_to(value, now).unwrap();

        assert_eq!(parse("now"), now);
        assert_eq!(parse("Today"), datetime(2024, 5, 10, 0, 0));
        assert_eq!(parse("TOMORROW"), datetime(2024, 5, 11, 0, 0));
        assert_eq!(parse(" yesterday "), datetime(2024, 5, 9, 0, 0));
    }

    #[test]
    fn years() {
        assert_eq!(parse_year("1990").unwrap(), datetime(1990, 1, 1, 0, 0));
        assert_eq!(parse_date_time("0476").unwrap(), datetime(476, 1, 1, 0, 0));
        assert!(parse_year("0000").is_err());
        assert!(parse_year("19x0").is_err());
        assert!(parse_date_time("abcd").is_err());
    }

    #[test]
    fn formats() {
        let expected = datetime(1990, 3, 17, 10, 25);
        assert_eq!(parse_date_time("1990-03-17T10:25:00").unwrap(), expected);
        assert_eq!(parse_date_time("1990-03-17 10:25:00").unwrap(), expected);
        assert_eq!(parse_date_time("03/17/1990 10:25:00").unwrap(), expected);
        assert_eq!(parse_date_time("03/17/1990 10:25:00 AM").unwrap(), expected);

        let midnight = datetime(1990, 3, 17, 0, 0);
        assert_eq!(parse_date_time("1990-03-17").unwrap(), midnight);
        assert_eq!(parse_date_time("03/17/1990").unwrap(), midnight);
        assert_eq!(parse_date_time("Mar 17 1990").unwrap(), midnight);
        assert_eq!(parse_date_time("March 17, 1990").unwrap(), midnight);
    }

    #[test]
    fn unrecognised() {
        assert_eq!(
            parse_date_time("the day after"),
            Err(DateParseError::Unrecognised("the day after".to_string()))
        );
    }
}
