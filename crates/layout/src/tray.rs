// SPDX-License-Identifier: MIT

//!
//! The tray: a stack of bands kept on the same date
//!

use crate::band::{Band, BandSnapshot};
use crate::engine::{LayoutError, MIN_COLUMN_COUNT, RowAssignment, VisibilityEvent, WindowError};
use chrono::{Duration, NaiveDateTime};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use timeline_bands_core::EventSet;

/// Mouse wheel deltas are divided by this to get pixels
const SCROLL_DIVISOR: f64 = 5.0;

/// Errors that can arise when working with a tray
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrayError {
    #[error("A tray needs exactly one main band, found {0}")]
    MainBandCount(usize),

    #[error("There is no band {0}")]
    NoSuchBand(usize),

    #[error("Expected {expected} band heights, got {got}")]
    BandHeights { expected: usize, got: usize },

    #[error("{0}")]
    Window(#[from] WindowError),

    #[error("{0}")]
    Layout(#[from] LayoutError),
}

/// Everything needed to draw a tray
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraySnapshot {
    pub current_date: NaiveDateTime,
    pub main_window_span_seconds: i64,
    pub bands: Vec<BandSnapshot>,
}

/// A set of bands sharing one current date.  The main band decides which
/// row each event is drawn in; the other bands reuse those rows.
#[derive(Debug, Clone)]
pub struct Tray {
    bands: Vec<Band>,
    main: usize,
    events: EventSet,
    rows: RowAssignment,
    current_date: NaiveDateTime,
}

impl Tray {
    /// Create a tray with the bands in top to bottom order.  Every band is
    /// moved to the main band's date.
    pub fn new(bands: Vec<Band>) -> Result<Self, TrayError> {
        let mains: Vec<usize> = bands
            .iter()
            .enumerate()
            .filter(|(_, band)| band.is_main())
            .map(|(index, _)| index)
            .collect();
        let &[main] = mains.as_slice() else {
            return Err(TrayError::MainBandCount(mains.len()));
        };

        let current_date = bands[main].window().anchor();
        let mut tray = Tray {
            bands,
            main,
            events: EventSet::default(),
            rows: RowAssignment::new(),
            current_date,
        };
        tray.set_current_date(current_date);
        info!("tray created with {} bands", tray.bands.len());
        Ok(tray)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> Result<&Band, TrayError> {
        self.bands.get(index).ok_or(TrayError::NoSuchBand(index))
    }

    pub fn main_band(&self) -> &Band {
        &self.bands[self.main]
    }

    /// Index of the main band in [`Tray::bands`]
    pub fn main_index(&self) -> usize {
        self.main
    }

    pub fn events(&self) -> &EventSet {
        &self.events
    }

    pub fn rows(&self) -> &RowAssignment {
        &self.rows
    }

    pub fn current_date(&self) -> NaiveDateTime {
        self.current_date
    }

    /// The span inside the main band's window, highlighted on other bands
    pub fn main_window_span(&self) -> Duration {
        self.main_band().window().inner_time_span()
    }

    /// Replace the events drawn on every band
    pub fn set_events(&mut self, events: EventSet) -> Result<(), TrayError> {
        debug!("tray given {} events", events.len());
        for band in &mut self.bands {
            band.clear_events();
        }
        self.events = events;
        self.refresh_events()
    }

    /// Reassign rows and recalculate geometry on every band, then redisplay
    fn refresh_events(&mut self) -> Result<(), TrayError> {
        self.rebuild(|_, _| Ok(()))
    }

    /// Apply `change` to every band then lay the events out again.  Changes
    /// are made to copies of the bands, so on failure the tray is as it was.
    fn rebuild<F>(&mut self, mut change: F) -> Result<(), TrayError>
    where
        F: FnMut(usize, &mut Band) -> Result<(), TrayError>,
    {
        let mut bands = self.bands.clone();
        for (index, band) in bands.iter_mut().enumerate() {
            change(index, band)?;
        }
        let rows = lay_out(&mut bands, self.main, &self.events)?;
        self.bands = bands;
        self.rows = rows;
        Ok(())
    }

    /// Move every band to `date` (clamped to the main band's bounds)
    pub fn set_current_date(&mut self, date: NaiveDateTime) {
        let main = &mut self.bands[self.main];
        main.set_current_date(date);
        let date = main.window().anchor();

        for band in &mut self.bands {
            band.set_current_date(date);
            band.display_events(&self.events);
        }
        self.current_date = date;
    }

    /// Move every band by `span`
    pub fn move_by(&mut self, span: Duration) {
        let date = self.main_band().window().offset_anchor(span);
        self.set_current_date(date);
    }

    /// Drag the given band `pixel_delta` pixels to the right (i.e. back in
    /// time)
    pub fn drag(&mut self, band: usize, pixel_delta: f64) -> Result<(), TrayError> {
        let span = self.band(band)?.window().pixels_to_time_span(pixel_delta);
        self.move_by(-span);
        Ok(())
    }

    /// Scroll the given band with the mouse wheel
    pub fn scroll(&mut self, band: usize, wheel_delta: f64) -> Result<(), TrayError> {
        self.drag(band, wheel_delta / SCROLL_DIVISOR)
    }

    /// Move back by one column of the main band
    pub fn move_left(&mut self) {
        let span = self.main_band().window().column_time_width();
        self.move_by(-span);
    }

    /// Move forward by one column of the main band
    pub fn move_right(&mut self) {
        let span = self.main_band().window().column_time_width();
        self.move_by(span);
    }

    /// Go to the earliest allowed date
    pub fn find_first(&mut self) {
        let date = self.main_band().window().calendar().min_date();
        self.set_current_date(date);
    }

    /// Go to the latest allowed date
    pub fn find_last(&mut self) {
        let date = self.main_band().window().calendar().max_date();
        self.set_current_date(date);
    }

    /// Show one column less on every band (bands already at the minimum are
    /// left alone)
    pub fn zoom_in(&mut self) -> Result<(), TrayError> {
        self.zoom(-1)
    }

    /// Show one column more on every band
    pub fn zoom_out(&mut self) -> Result<(), TrayError> {
        self.zoom(1)
    }

    fn zoom(&mut self, step: isize) -> Result<(), TrayError> {
        self.rebuild(|_, band| {
            let column_count = band.window().column_count().saturating_add_signed(step);
            if column_count >= MIN_COLUMN_COUNT {
                band.set_column_count(column_count)?;
            }
            Ok(())
        })?;
        debug!("zoomed by {step} columns");
        Ok(())
    }

    /// Resize the tray.  `band_heights` are in band order.
    pub fn resize(&mut self, pixel_width: f64, band_heights: &[f64]) -> Result<(), TrayError> {
        if band_heights.len() != self.bands.len() {
            return Err(TrayError::BandHeights {
                expected: self.bands.len(),
                got: band_heights.len(),
            });
        }
        self.rebuild(|index, band| Ok(band.set_pixel_size(pixel_width, band_heights[index])?))
    }

    /// Visibility changes on every band since the last drain, with the index
    /// of the band
    pub fn drain_visibility_events(&mut self) -> Vec<(usize, VisibilityEvent)> {
        self.bands
            .iter_mut()
            .enumerate()
            .flat_map(|(index, band)| {
                band.drain_visibility_events()
                    .map(move |event| (index, event))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn snapshot(&self) -> TraySnapshot {
        let main_span = self.main_window_span();
        TraySnapshot {
            current_date: self.current_date,
            main_window_span_seconds: main_span.num_seconds(),
            bands: self
                .bands
                .iter()
                .map(|band| band.snapshot(main_span))
                .collect(),
        }
    }
}

/// Assign rows on the main band and position and display events on every
/// band with them
fn lay_out(bands: &mut [Band], main: usize, events: &EventSet) -> Result<RowAssignment, TrayError> {
    let rows = bands[main].assign_rows(events)?;
    for band in bands.iter_mut() {
        band.calculate_positions(events, &rows)?;
        band.display_events(events);
    }
    Ok(rows)
}
