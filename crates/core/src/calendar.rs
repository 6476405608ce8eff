// SPDX-License-Identifier: MIT

//!
//! Calendar indexing: conversions between a datetime and a granularity
//! relative integer index
//!

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    /// The earliest representable datetime.  Every index is counted from here.
    pub static ref MIN_DATE_TIME: NaiveDateTime = NaiveDate::from_ymd_opt(1, 1, 1)
        .expect("0001-01-01 is a valid date")
        .and_time(NaiveTime::MIN);

    /// The latest representable datetime
    pub static ref MAX_DATE_TIME: NaiveDateTime = NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_nano_opt(23, 59, 59, 999_999_999))
        .expect("9999-12-31T23:59:59.999999999 is a valid datetime");
}

/// The smallest step between two datetimes
pub const TICK: Duration = Duration::nanoseconds(1);

/// Errors that can arise in relation to a [`TimelineCalendar`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The granularity name isn't one that is supported
    #[error("Granularity `{0}` is not supported")]
    UnknownGranularity(String),

    /// The minimum date is after the maximum date
    #[error("Minimum date `{min}` is after maximum date `{max}`")]
    InvertedBounds {
        min: NaiveDateTime,
        max: NaiveDateTime,
    },
}

/// The calendar unit that a band's columns represent
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Decades,
    Years,
    Months,
    Days,
    Hours,
    TenMinutes,
    Minutes,
}

impl Granularity {
    /// Every granularity, coarsest first
    pub const ALL: [Granularity; 7] = [
        Granularity::Decades,
        Granularity::Years,
        Granularity::Months,
        Granularity::Days,
        Granularity::Hours,
        Granularity::TenMinutes,
        Granularity::Minutes,
    ];

    /// A fixed length for one unit, used for pixel scaling.  Calendar units are
    /// approximated (365 day years, 31 day months) so this is not calendar
    /// exact.
    pub fn nominal_length(&self) -> Duration {
        match self {
            Granularity::Decades => Duration::days(365 * 10),
            Granularity::Years => Duration::days(365),
            Granularity::Months => Duration::days(31),
            Granularity::Days => Duration::days(1),
            Granularity::Hours => Duration::hours(1),
            Granularity::TenMinutes => Duration::minutes(10),
            Granularity::Minutes => Duration::minutes(1),
        }
    }
}

impl FromStr for Granularity {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "decades" => Ok(Granularity::Decades),
            "years" => Ok(Granularity::Years),
            "months" => Ok(Granularity::Months),
            "days" => Ok(Granularity::Days),
            "hours" => Ok(Granularity::Hours),
            "ten_minutes" | "tenminutes" | "minutes10" => Ok(Granularity::TenMinutes),
            "minutes" => Ok(Granularity::Minutes),
            _ => Err(CalendarError::UnknownGranularity(value.to_string())),
        }
    }
}

/// Accepts the same names as [`FromStr`], so config files can say `"Days"` or
/// `"minutes10"`
impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

/// Maps datetimes to column indexes (and back) for one [`Granularity`], within
/// a configured date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineCalendar {
    granularity: Granularity,
    min_date: NaiveDateTime,
    max_date: NaiveDateTime,
}

impl TimelineCalendar {
    /// A calendar covering the full representable range
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            min_date: *MIN_DATE_TIME,
            max_date: *MAX_DATE_TIME,
        }
    }

    /// A calendar limited to `[min_date, max_date]`.  The bounds are clamped to
    /// the representable range.
    pub fn with_bounds(
        granularity: Granularity,
        min_date: NaiveDateTime,
        max_date: NaiveDateTime,
    ) -> Result<Self, CalendarError> {
        if min_date > max_date {
            return Err(CalendarError::InvertedBounds {
                min: min_date,
                max: max_date,
            });
        }
        Ok(Self {
            granularity,
            min_date: clamp_to_representable(min_date),
            max_date: clamp_to_representable(max_date),
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn min_date(&self) -> NaiveDateTime {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDateTime {
        self.max_date
    }

    /// Clamp a date to the calendar's configured bounds
    pub fn clamp(&self, date: NaiveDateTime) -> NaiveDateTime {
        date.clamp(self.min_date, self.max_date)
    }

    /// The number of whole units between [`MIN_DATE_TIME`] and `date`
    pub fn index_of(&self, date: NaiveDateTime) -> i64 {
        let epoch = *MIN_DATE_TIME;
        let date = clamp_to_representable(date);

        match self.granularity {
            // Calendar units
            Granularity::Decades => i64::from(date.year() / 10 - epoch.year() / 10),
            Granularity::Years => i64::from(date.year() - epoch.year()),
            Granularity::Months => {
                (i64::from(date.year()) * 12 + i64::from(date.month()))
                    - (i64::from(epoch.year()) * 12 + i64::from(epoch.month()))
            }

            // Duration units
            Granularity::Days => (date - epoch).num_days(),
            Granularity::Hours => (date - epoch).num_hours(),
            Granularity::TenMinutes => (date - epoch).num_minutes() / 10,
            Granularity::Minutes => (date - epoch).num_minutes(),
        }
    }

    /// The start of the unit with the given index.  Negative indexes are
    /// treated as 0, and indexes past the representable range give
    /// [`MAX_DATE_TIME`].
    pub fn date_at(&self, index: i64) -> NaiveDateTime {
        let epoch = *MIN_DATE_TIME;
        let index = index.max(0);

        let date = match self.granularity {
            // Calendar units
            Granularity::Decades => index
                .checked_mul(10)
                .and_then(|year| start_of_year(year.max(i64::from(epoch.year())))),
            Granularity::Years => index
                .checked_add(i64::from(epoch.year()))
                .and_then(start_of_year),
            Granularity::Months => {
                let months = index.saturating_add(i64::from(epoch.month0()));
                i64::from(epoch.year())
                    .checked_add(months / 12)
                    .and_then(|year| start_of_month(year, (months % 12) as u32 + 1))
            }

            // Duration units
            Granularity::Days => Duration::try_days(index)
                .and_then(|span| epoch.checked_add_signed(span)),
            Granularity::Hours => Duration::try_hours(index)
                .and_then(|span| epoch.checked_add_signed(span)),
            Granularity::TenMinutes => index
                .checked_mul(10)
                .and_then(Duration::try_minutes)
                .and_then(|span| epoch.checked_add_signed(span)),
            Granularity::Minutes => Duration::try_minutes(index)
                .and_then(|span| epoch.checked_add_signed(span)),
        };

        date.filter(|date| *date <= *MAX_DATE_TIME)
            .unwrap_or(*MAX_DATE_TIME)
    }

    /// Round down to the start of the unit containing `date`
    pub fn floor(&self, date: NaiveDateTime) -> NaiveDateTime {
        self.date_at(self.index_of(date))
    }

    /// Round up to the last tick of the unit containing `date`
    pub fn ceiling(&self, date: NaiveDateTime) -> NaiveDateTime {
        let index = self.index_of(date);
        if index >= self.index_of(*MAX_DATE_TIME) {
            return *MAX_DATE_TIME;
        }
        self.date_at(index + 1) - TICK
    }

    /// A short caption for the column starting at `date`.  Columns on a
    /// boundary of the next coarser unit carry extra context (e.g. the first
    /// day of a month shows the month).
    pub fn label(&self, date: NaiveDateTime) -> String {
        match self.granularity {
            Granularity::Decades => ((date.year() / 10) * 10).to_string(),
            Granularity::Years => date.year().to_string(),
            Granularity::Months => {
                if date.month() == 1 {
                    date.format("%b %Y").to_string()
                } else {
                    date.format("%b").to_string()
                }
            }
            Granularity::Days => {
                let mut label = date.day().to_string();
                if date.day() == 1 {
                    label.push_str(&date.format(" %b").to_string());
                    if date.month() == 1 {
                        label.push_str(&date.format(" %Y").to_string());
                    }
                }
                label
            }
            Granularity::Hours => date.format("%I %p").to_string(),
            Granularity::TenMinutes => {
                if date.minute() == 0 {
                    format!("{}:00", date.hour())
                } else {
                    ((date.minute() / 10) * 10).to_string()
                }
            }
            Granularity::Minutes => date.format("%M").to_string(),
        }
    }
}

/// Clamp to `[MIN_DATE_TIME, MAX_DATE_TIME]`
pub fn clamp_to_representable(date: NaiveDateTime) -> NaiveDateTime {
    date.clamp(*MIN_DATE_TIME, *MAX_DATE_TIME)
}

fn start_of_year(year: i64) -> Option<NaiveDateTime> {
    start_of_month(year, 1)
}

fn start_of_month(year: i64, month: u32) -> Option<NaiveDateTime> {
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.and_time(NaiveTime::MIN))
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
    fn index_round_trip() {
        for granularity in Granularity::ALL {
            let calendar = TimelineCalendar::new(granularity);
            let max = calendar.index_of(*MAX_DATE_TIME);
            for index in [0, 1, 2, 9, 10, 11, 12, 13, 365, max / 2, max - 1, max] {
                assert_eq!(
                    calendar.index_of(calendar.date_at(index)),
                    index,
                    "{granularity} index {index}"
                );
            }
        }
    }

    #[test]
    fn index_of_calendar_and_duration_units() {
        let date = datetime(1990, 3, 17, 10, 25);
        let index = |granularity| TimelineCalendar::new(granularity).index_of(date);

        assert_eq!(index(Granularity::Decades), 199);
        assert_eq!(index(Granularity::Years), 1989);
        assert_eq!(index(Granularity::Months), 1989 * 12 + 2);

        let days = index(Granularity::Days);
        assert_eq!(index(Granularity::Hours), days * 24 + 10);
        assert_eq!(index(Granularity::Minutes), (days * 24 + 10) * 60 + 25);
        assert_eq!(index(Granularity::TenMinutes), ((days * 24 + 10) * 60 + 25) / 10);
    }

    #[test]
    fn floor_and_ceiling_bracket_dates() {
        for granularity in Granularity::ALL {
            let calendar = TimelineCalendar::new(granularity);
            let boundary = calendar.date_at(calendar.index_of(datetime(1990, 3, 1, 0, 0)));
            for date in [boundary, boundary + TICK, boundary - TICK] {
                let floor = calendar.floor(date);
                let ceiling = calendar.ceiling(date);
                assert!(floor <= date, "{granularity} floor {floor} > {date}");
                assert!(date <= ceiling, "{granularity} ceiling {ceiling} < {date}");
            }
            assert_eq!(calendar.floor(boundary), boundary);
            assert_eq!(calendar.ceiling(boundary - TICK), boundary - TICK);
        }
    }

    #[test]
    fn floor_values() {
        let date = datetime(1994, 3, 17, 10, 27);
        let floor = |granularity| TimelineCalendar::new(granularity).floor(date);

        assert_eq!(floor(Granularity::Decades), datetime(1990, 1, 1, 0, 0));
        assert_eq!(floor(Granularity::Years), datetime(1994, 1, 1, 0, 0));
        assert_eq!(floor(Granularity::Months), datetime(1994, 3, 1, 0, 0));
        assert_eq!(floor(Granularity::Days), datetime(1994, 3, 17, 0, 0));
        assert_eq!(floor(Granularity::Hours), datetime(1994, 3, 17, 10, 0));
        assert_eq!(floor(Granularity::TenMinutes), datetime(1994, 3, 17, 10, 20));
        assert_eq!(floor(Granularity::Minutes), date);
    }

    #[test]
    fn ceiling_at_the_end_of_time() {
        for granularity in Granularity::ALL {
            let calendar = TimelineCalendar::new(granularity);
            assert_eq!(calendar.ceiling(*MAX_DATE_TIME), *MAX_DATE_TIME);
        }
        let months = TimelineCalendar::new(Granularity::Months);
        assert_eq!(
            months.ceiling(datetime(2024, 2, 10, 0, 0)),
            datetime(2024, 3, 1, 0, 0) - TICK
        );
    }

    #[test]
    fn date_at_clamps() {
        let days = TimelineCalendar::new(Granularity::Days);
        assert_eq!(days.date_at(-5), *MIN_DATE_TIME);
        assert_eq!(days.date_at(i64::MAX), *MAX_DATE_TIME);

        let years = TimelineCalendar::new(Granularity::Years);
        assert_eq!(years.date_at(20_000), *MAX_DATE_TIME);
    }

    #[test]
    fn labels() {
        let label = |granularity, date| TimelineCalendar::new(granularity).label(date);

        assert_eq!(label(Granularity::Decades, datetime(1994, 1, 1, 0, 0)), "1990");
        assert_eq!(label(Granularity::Years, datetime(1994, 1, 1, 0, 0)), "1994");
        assert_eq!(label(Granularity::Months, datetime(1994, 1, 1, 0, 0)), "Jan 1994");
        assert_eq!(label(Granularity::Months, datetime(1994, 2, 1, 0, 0)), "Feb");
        assert_eq!(label(Granularity::Days, datetime(1994, 1, 1, 0, 0)), "1 Jan 1994");
        assert_eq!(label(Granularity::Days, datetime(1994, 3, 1, 0, 0)), "1 Mar");
        assert_eq!(label(Granularity::Days, datetime(1994, 3, 5, 0, 0)), "5");
        assert_eq!(label(Granularity::Hours, datetime(1994, 3, 5, 15, 0)), "03 PM");
        assert_eq!(label(Granularity::TenMinutes, datetime(1994, 3, 5, 14, 0)), "14:00");
        assert_eq!(label(Granularity::TenMinutes, datetime(1994, 3, 5, 14, 27)), "20");
        assert_eq!(label(Granularity::Minutes, datetime(1994, 3, 5, 14, 7)), "07");
    }

    #[test]
    fn bounds() {
        let early = datetime(1990, 1, 1, 0, 0);
        let late = datetime(2000, 1, 1, 0, 0);
        assert!(TimelineCalendar::with_bounds(Granularity::Years, late, early).is_err());

        let calendar = TimelineCalendar::with_bounds(Granularity::Years, early, late).unwrap();
        assert_eq!(calendar.clamp(datetime(2050, 1, 1, 0, 0)), late);
        assert_eq!(calendar.clamp(datetime(1950, 1, 1, 0, 0)), early);
    }

    #[test]
    fn granularity_from_str() {
        assert_eq!("Days".parse::<Granularity>().unwrap(), Granularity::Days);
        assert_eq!(
            "minutes10".parse::<Granularity>().unwrap(),
            Granularity::TenMinutes
        );
        assert!("fortnights".parse::<Granularity>().is_err());
    }

    #[test]
    fn granularity_deserialize() {
        let parse = |json: &str| serde_json::from_str::<Granularity>(json);
        assert_eq!(parse(r#""ten_minutes""#).unwrap(), Granularity::TenMinutes);
        assert_eq!(parse(r#""minutes10""#).unwrap(), Granularity::TenMinutes);
        assert_eq!(parse(r#"" Days ""#).unwrap(), Granularity::Days);
        assert!(parse(r#""fortnights""#).is_err());

        // Written names read back
        for granularity in Granularity::ALL {
            let json = serde_json::to_string(&granularity).unwrap();
            assert_eq!(parse(&json).unwrap(), granularity);
        }
    }
}
