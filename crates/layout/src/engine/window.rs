// SPDX-License-Identifier: MIT

//!
//! The time window: which slice of the calendar a band shows, and where each
//! column sits in pixels
//!

use super::{duration_as_seconds, seconds_as_duration};
use chrono::{Duration, NaiveDateTime};
use log::{debug, trace};
use serde::Serialize;
use std::fmt::Debug;
use thiserror::Error;
use timeline_bands_core::{Granularity, TICK, TimelineCalendar};

/// The fewest columns a window can show
pub const MIN_COLUMN_COUNT: usize = 2;

/// Errors that can arise when sizing a window
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    #[error("A window needs at least 2 columns, not {0}")]
    ColumnCount(usize),

    #[error("Pixel width must be positive, not {0}")]
    PixelWidth(f64),

    #[error("Pixel height must not be negative, not {0}")]
    PixelHeight(f64),
}

/// One column of the window, i.e. one calendar unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Calendar index of the unit
    pub index: i64,

    /// Start of the unit
    pub date: NaiveDateTime,

    /// Left edge in pixels, relative to the band (can be negative or past the
    /// right edge for the spare columns)
    pub left: f64,

    pub label: String,
}

/// Maps between time and pixels for one band.  The anchor date is always
/// drawn at the horizontal centre of the band.
///
/// Two more columns than `column_count` are laid out so that there is
/// something to show while dragging.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    calendar: TimelineCalendar,
    anchor: NaiveDateTime,
    column_count: usize,
    pixel_width: f64,
    pixel_height: f64,

    columns: Vec<Column>,
    min_index: i64,
    max_index: i64,
}

impl TimeWindow {
    /// Create a window showing `column_count` units either side of `anchor`
    /// (which is clamped to the calendar's bounds)
    pub fn new(
        calendar: TimelineCalendar,
        anchor: NaiveDateTime,
        column_count: usize,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Result<Self, WindowError> {
        validate(column_count, pixel_width, pixel_height)?;
        let mut window = TimeWindow {
            calendar,
            anchor: calendar.clamp(anchor),
            column_count,
            pixel_width,
            pixel_height,
            columns: Vec::new(),
            min_index: 0,
            max_index: 0,
        };
        window.recompute();
        Ok(window)
    }

    pub fn calendar(&self) -> &TimelineCalendar {
        &self.calendar
    }

    pub fn granularity(&self) -> Granularity {
        self.calendar.granularity()
    }

    /// The date drawn at the centre of the band
    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    pub fn column_pixel_width(&self) -> f64 {
        self.pixel_width / self.column_count as f64
    }

    /// All laid out columns, left to right
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column containing the anchor
    pub fn anchor_column(&self) -> &Column {
        &self.columns[self.middle()]
    }

    /// Calendar index just before the leftmost column (never below 0)
    pub fn min_visible_index(&self) -> i64 {
        self.min_index
    }

    /// Calendar index just after the rightmost column (never past the unit
    /// holding the calendar's maximum date)
    pub fn max_visible_index(&self) -> i64 {
        self.max_index
    }

    /// Position of the anchor column in [`TimeWindow::columns`]
    fn middle(&self) -> usize {
        self.column_count / 2 + 1
    }

    /// Lay the columns out again around the anchor
    pub fn recompute(&mut self) {
        let column_pixel_width = self.column_pixel_width();
        let last_index = self.calendar.index_of(self.calendar.max_date());
        let anchor_index = self.calendar.index_of(self.anchor);
        let anchor_left =
            self.pixel_width / 2.0 - self.pixels_for(self.anchor - self.calendar.floor(self.anchor));
        let middle = self.middle();

        let mut columns = Vec::with_capacity(self.column_count + 2);

        // Left of the anchor, walking outwards
        let mut index = anchor_index - 1;
        let mut left = anchor_left - column_pixel_width;
        for _ in 0..middle {
            columns.push(self.column(index.clamp(0, last_index), left));
            index -= 1;
            left -= column_pixel_width;
        }
        self.min_index = index.max(0);
        columns.reverse();

        // The anchor and right of it
        let mut index = anchor_index;
        let mut left = anchor_left;
        for _ in middle..self.column_count + 2 {
            columns.push(self.column(index.clamp(0, last_index), left));
            index = index.saturating_add(1);
            left += column_pixel_width;
        }
        self.max_index = index.min(last_index);

        self.columns = columns;
        trace!(
            "{} window around {}: indexes {}..={}",
            self.granularity(),
            self.anchor,
            self.min_index,
            self.max_index
        );
    }

    fn column(&self, index: i64, left: f64) -> Column {
        let date = self.calendar.date_at(index);
        Column {
            index,
            date,
            left,
            label: self.calendar.label(date),
        }
    }

    /// Seconds in the nominal span shown by the window
    fn nominal_seconds(&self) -> f64 {
        duration_as_seconds(self.granularity().nominal_length()) * self.column_count as f64
    }

    /// How many pixels a span of time covers
    pub fn pixels_for(&self, span: Duration) -> f64 {
        self.pixel_width * duration_as_seconds(span) / self.nominal_seconds()
    }

    /// How much time a number of pixels covers, to the nearest millisecond
    pub fn pixels_to_time_span(&self, pixels: f64) -> Duration {
        seconds_as_duration(pixels * self.nominal_seconds() / self.pixel_width)
    }

    /// Move the anchor, clamping it to the calendar's bounds
    pub fn set_anchor(&mut self, date: NaiveDateTime) {
        let anchor = self.calendar.clamp(date);
        if anchor != date {
            debug!("anchor {date} clamped to {anchor}");
        }
        self.anchor = anchor;
        self.recompute();
    }

    /// The anchor moved by `span`, clamped to the calendar's bounds
    pub fn offset_anchor(&self, span: Duration) -> NaiveDateTime {
        match self.anchor.checked_add_signed(span) {
            Some(date) => self.calendar.clamp(date),
            None if span < Duration::zero() => self.calendar.min_date(),
            None => self.calendar.max_date(),
        }
    }

    /// Move the anchor by `span`
    pub fn move_by(&mut self, span: Duration) {
        let anchor = self.offset_anchor(span);
        self.set_anchor(anchor);
    }

    pub fn set_column_count(&mut self, column_count: usize) -> Result<(), WindowError> {
        validate(column_count, self.pixel_width, self.pixel_height)?;
        self.column_count = column_count;
        self.recompute();
        Ok(())
    }

    pub fn set_pixel_size(&mut self, pixel_width: f64, pixel_height: f64) -> Result<(), WindowError> {
        validate(self.column_count, pixel_width, pixel_height)?;
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        self.recompute();
        Ok(())
    }

    /// The width in time of the unit holding the anchor (1 tick short of the
    /// whole unit).  At either bound of the calendar the neighbouring unit
    /// inside the bounds is measured instead.
    pub fn column_time_width(&self) -> Duration {
        let date = if self.anchor == self.calendar.max_date() {
            self.calendar
                .floor(self.anchor)
                .checked_sub_signed(TICK)
                .unwrap_or(self.anchor)
        } else if self.anchor == self.calendar.min_date() {
            self.calendar
                .ceiling(self.anchor)
                .checked_add_signed(TICK)
                .unwrap_or(self.anchor)
        } else {
            self.anchor
        };
        self.calendar.ceiling(date) - self.calendar.floor(date)
    }

    /// The dates an event must touch to be drawn: from the start of the unit
    /// at the min visible index to the end of the unit at the max visible
    /// index
    pub fn visible_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        let begin = self.calendar.floor(self.calendar.date_at(self.min_index));
        let end = self.calendar.ceiling(self.calendar.date_at(self.max_index));
        (begin, end)
    }

    /// The span inside the spare columns, which other bands highlight
    pub fn inner_time_span(&self) -> Duration {
        let first = self.calendar.date_at(self.min_index + 2);
        let last = self.calendar.date_at(self.max_index - 2);
        (last - first).max(Duration::zero())
    }
}

fn validate(column_count: usize, pixel_width: f64, pixel_height: f64) -> Result<(), WindowError> {
    if column_count < MIN_COLUMN_COUNT {
        return Err(WindowError::ColumnCount(column_count));
    }
    if !(pixel_width.is_finite() && pixel_width > 0.0) {
        return Err(WindowError::PixelWidth(pixel_width));
    }
    if !(pixel_height.is_finite() && pixel_height >= 0.0) {
        return Err(WindowError::PixelHeight(pixel_height));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use timeline_bands_core::{MAX_DATE_TIME, MIN_DATE_TIME};

    fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn days_window(anchor: NaiveDateTime) -> TimeWindow {
        TimeWindow::new(TimelineCalendar::new(Granularity::Days), anchor, 10, 1000.0, 200.0)
            .unwrap()
    }

    fn bounded(granularity: Granularity, anchor: NaiveDateTime) -> TimeWindow {
        let calendar =
            TimelineCalendar::with_bounds(granularity, datetime(1990, 1, 1), datetime(2010, 1, 1))
                .unwrap();
        TimeWindow::new(calendar, anchor, 10, 1000.0, 200.0).unwrap()
    }

    #[test]
    fn anchor_column_centred() {
        let anchor = datetime(2000, 1, 15);
        let window = days_window(anchor);

        assert_eq!(window.column_pixel_width(), 100.0);
        assert_eq!(window.columns().len(), 12);

        let column = window.anchor_column();
        assert_eq!(column.left, 500.0);
        assert_eq!(column.date, anchor);
        assert_eq!(column.index, window.calendar().index_of(anchor));

        let columns = window.columns();
        assert_eq!(columns[5].left, 400.0);
        assert_eq!(columns[5].date, datetime(2000, 1, 14));
        assert_eq!(columns[7].left, 600.0);
        assert_eq!(columns[0].left, -100.0);
        assert_eq!(columns[11].left, 1000.0);

        let lefts: Vec<f64> = columns.iter().map(|column| column.left).collect();
        assert!(lefts.windows(2).all(|pair| pair[1] - pair[0] == 100.0));
    }

    #[test]
    fn anchor_offset_within_column() {
        let anchor = datetime(2000, 1, 15) + Duration::hours(6);
        let window = days_window(anchor);
        assert_eq!(window.anchor_column().left, 475.0);
        assert_eq!(window.anchor_column().date, datetime(2000, 1, 15));
    }

    #[test]
    fn visible_indexes() {
        let anchor = datetime(2000, 1, 15);
        let window = days_window(anchor);
        let index = window.calendar().index_of(anchor);

        assert_eq!(window.min_visible_index(), index - 7);
        assert_eq!(window.max_visible_index(), index + 6);
        assert_eq!(window.columns()[0].index, index - 6);
        assert_eq!(window.columns()[11].index, index + 5);

        let (begin, end) = window.visible_range();
        assert_eq!(begin, datetime(2000, 1, 8));
        assert_eq!(end, datetime(2000, 1, 22) - TICK);
        assert_eq!(window.inner_time_span(), Duration::days(9));
    }

    #[test]
    fn anchor_clamped() {
        let max = datetime(2010, 1, 1);
        let window = bounded(Granularity::Days, max + Duration::days(100));
        assert_eq!(window.anchor(), max);

        let mut window = bounded(Granularity::Days, datetime(2000, 1, 1));
        window.move_by(Duration::days(-100_000));
        assert_eq!(window.anchor(), datetime(1990, 1, 1));
        window.move_by(Duration::days(3_000_000));
        assert_eq!(window.anchor(), max);
        window.set_anchor(datetime(1900, 1, 1));
        assert_eq!(window.anchor(), datetime(1990, 1, 1));
    }

    #[test]
    fn column_indexes_clamped() {
        let window = bounded(Granularity::Years, datetime(2010, 1, 1));
        let last = window.calendar().index_of(datetime(2010, 1, 1));
        assert!(window.columns().iter().all(|column| column.index <= last));
        assert_eq!(window.max_visible_index(), last);

        let window = TimeWindow::new(
            TimelineCalendar::new(Granularity::Years),
            *MIN_DATE_TIME,
            10,
            1000.0,
            200.0,
        )
        .unwrap();
        assert!(window.columns().iter().all(|column| column.index >= 0));
        assert_eq!(window.min_visible_index(), 0);
        assert_eq!(window.inner_time_span(), Duration::days(365 + 366));

        let window = TimeWindow::new(
            TimelineCalendar::new(Granularity::Minutes),
            *MAX_DATE_TIME,
            10,
            1000.0,
            200.0,
        )
        .unwrap();
        let last = window.calendar().index_of(*MAX_DATE_TIME);
        assert!(window.columns().iter().all(|column| column.index <= last));
        assert!(window.inner_time_span() >= Duration::zero());
    }

    #[test]
    fn pixels_round_trip() {
        let window = days_window(datetime(2000, 1, 15));
        let span = Duration::days(2) + Duration::hours(3);
        assert_eq!(window.pixels_for(span), 212.5);
        assert_eq!(window.pixels_to_time_span(212.5), span);
        assert_eq!(window.pixels_to_time_span(-100.0), Duration::days(-1));

        for granularity in Granularity::ALL {
            let window = TimeWindow::new(
                TimelineCalendar::new(granularity),
                datetime(2000, 1, 15),
                7,
                777.0,
                100.0,
            )
            .unwrap();
            let span = Duration::minutes(12_345) + Duration::milliseconds(678);
            let round_trip = window.pixels_to_time_span(window.pixels_for(span));
            assert!((round_trip - span).num_milliseconds().abs() <= 1);
        }
    }

    #[test]
    fn column_time_width() {
        let window = days_window(datetime(2000, 1, 15) + Duration::hours(3));
        assert_eq!(window.column_time_width(), Duration::days(1) - TICK);

        let window = bounded(Granularity::Months, datetime(2000, 2, 10));
        assert_eq!(window.column_time_width(), Duration::days(29) - TICK);

        // At the minimum, February is measured instead of January
        let window = bounded(Granularity::Months, datetime(1990, 1, 1));
        assert_eq!(window.column_time_width(), Duration::days(28) - TICK);

        // At the maximum, December is measured instead of January
        let window = bounded(Granularity::Months, datetime(2010, 1, 1));
        assert_eq!(window.column_time_width(), Duration::days(31) - TICK);
    }

    #[test]
    fn invalid_sizes() {
        let calendar = TimelineCalendar::new(Granularity::Days);
        let anchor = datetime(2000, 1, 1);
        assert_eq!(
            TimeWindow::new(calendar, anchor, 1, 1000.0, 100.0).unwrap_err(),
            WindowError::ColumnCount(1)
        );
        assert!(TimeWindow::new(calendar, anchor, 10, 0.0, 100.0).is_err());
        assert!(TimeWindow::new(calendar, anchor, 10, f64::INFINITY, 100.0).is_err());
        assert!(TimeWindow::new(calendar, anchor, 10, 1000.0, -1.0).is_err());

        let mut window = days_window(anchor);
        assert!(window.set_column_count(1).is_err());
        assert_eq!(window.column_count(), 10);
        window.set_column_count(4).unwrap();
        assert_eq!(window.columns().len(), 6);
        window.set_pixel_size(400.0, 50.0).unwrap();
        assert_eq!(window.column_pixel_width(), 100.0);
        assert_eq!(window.anchor_column().left, 200.0);
    }
}
