// SPDX-License-Identifier: MIT

//!
//! A band: one horizontal strip of the timeline with its own granularity
//!

use crate::engine::{
    Column, Geometry, LayoutError, LayoutParams, PlacedEvent, RowAssignment, TeaserParams,
    TimeWindow, VisibilityEvent, VisibleSet, WindowError, assign_rows, compute_positions,
    row_capacity, select_visible,
};
use chrono::{Duration, NaiveDateTime};
use log::{debug, trace};
use serde::Serialize;
use timeline_bands_core::{EventSet, Granularity};

/// The part of a secondary band covering the main band's window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Highlight {
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything needed to draw a band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSnapshot {
    pub granularity: Granularity,
    pub is_main: bool,
    pub anchor: NaiveDateTime,
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub column_pixel_width: f64,
    pub columns: Vec<Column>,
    pub events: Vec<PlacedEvent>,
    pub highlight: Option<Highlight>,
}

/// A [`TimeWindow`] and the events laid out on it.  Row assignment is done
/// by the main band only, and shared with the rest.
#[derive(Debug, Clone)]
pub struct Band {
    window: TimeWindow,
    params: LayoutParams,
    teaser: TeaserParams,
    is_main: bool,

    geometry: Geometry,
    placed: Vec<PlacedEvent>,
    visible: VisibleSet,
    visibility_events: Vec<VisibilityEvent>,
}

impl Band {
    pub fn new(window: TimeWindow, params: LayoutParams, is_main: bool) -> Result<Self, LayoutError> {
        params.validate()?;
        Ok(Band {
            window,
            params,
            teaser: TeaserParams::default(),
            is_main,
            geometry: Geometry::new(),
            placed: Vec::new(),
            visible: VisibleSet::default(),
            visibility_events: Vec::new(),
        })
    }

    /// Use `teaser` to shorten descriptions instead of the defaults
    pub fn with_teaser(mut self, teaser: TeaserParams) -> Self {
        self.teaser = teaser;
        self
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn teaser(&self) -> &TeaserParams {
        &self.teaser
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The events drawn as of the last [`Band::display_events`]
    pub fn placed_events(&self) -> &[PlacedEvent] {
        &self.placed
    }

    pub fn row_capacity(&self) -> Result<usize, LayoutError> {
        row_capacity(self.window.pixel_height(), &self.params)
    }

    /// Assign rows using as many rows as fit in this band
    pub fn assign_rows(&self, events: &EventSet) -> Result<RowAssignment, LayoutError> {
        let row_count = self.row_capacity()?;
        debug!("{} band has room for {row_count} rows", self.window.granularity());
        assign_rows(events, row_count)
    }

    pub fn calculate_positions(
        &mut self,
        events: &EventSet,
        rows: &RowAssignment,
    ) -> Result<(), LayoutError> {
        self.geometry = compute_positions(events, rows, &self.window, &self.params)?;
        Ok(())
    }

    /// Work out which events are drawn, queueing up visibility changes
    pub fn display_events(&mut self, events: &EventSet) {
        self.placed = select_visible(events, &self.geometry, &self.window, &self.teaser);
        let changes = self.visible.update(&self.placed);
        trace!(
            "{} band shows {} events ({} changes)",
            self.window.granularity(),
            self.placed.len(),
            changes.len()
        );
        self.visibility_events.extend(changes);
    }

    /// Forget all events, queueing up `Left` for each one shown
    pub fn clear_events(&mut self) {
        self.geometry.clear();
        self.placed.clear();
        let changes = self.visible.clear();
        self.visibility_events.extend(changes);
    }

    pub fn drain_visibility_events(&mut self) -> std::vec::Drain<'_, VisibilityEvent> {
        self.visibility_events.drain(..)
    }

    pub fn set_current_date(&mut self, date: NaiveDateTime) {
        self.window.set_anchor(date);
    }

    pub fn set_column_count(&mut self, column_count: usize) -> Result<(), WindowError> {
        self.window.set_column_count(column_count)
    }

    pub fn set_pixel_size(&mut self, pixel_width: f64, pixel_height: f64) -> Result<(), WindowError> {
        self.window.set_pixel_size(pixel_width, pixel_height)
    }

    /// Where the main band's window falls on this band, centred (without the
    /// 1px nudge some hosts add).  The main band isn't highlighted, nor is
    /// anything when the main window is empty.
    pub fn highlight(&self, main_span: Duration) -> Option<Highlight> {
        if self.is_main || main_span <= Duration::zero() {
            return None;
        }
        let width = self.window.pixels_for(main_span);
        Some(Highlight {
            left: (self.window.pixel_width() - width) / 2.0,
            width,
            height: self.window.pixel_height(),
        })
    }

    pub fn snapshot(&self, main_span: Duration) -> BandSnapshot {
        BandSnapshot {
            granularity: self.window.granularity(),
            is_main: self.is_main,
            anchor: self.window.anchor(),
            pixel_width: self.window.pixel_width(),
            pixel_height: self.window.pixel_height(),
            column_pixel_width: self.window.column_pixel_width(),
            columns: self.window.columns().to_vec(),
            events: self.placed.clone(),
            highlight: self.highlight(main_span),
        }
    }
}
