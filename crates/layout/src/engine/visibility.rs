// SPDX-License-Identifier: MIT

//!
//! Culling events to the window and tracking which are shown
//!

use super::{Geometry, TeaserParams, TimeWindow, VisibilityEvent};
use chrono::NaiveDateTime;
use log::trace;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Debug;
use timeline_bands_core::{EventId, EventSet};

/// An event ready to draw, with what's needed to decorate it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent {
    pub id: EventId,
    pub row: usize,
    pub top: f64,

    /// Relative to the band's left edge
    pub left: f64,
    pub width: f64,

    pub title: String,
    pub teaser: String,

    /// Set when the teaser is shorter than the description
    pub more_link_text: Option<String>,

    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_duration: bool,
    pub color: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub teaser_image: Option<String>,
}

/// The events touching the window's visible range, in start order, with
/// their horizontal positions.  Events without geometry are skipped.
pub fn select_visible(
    events: &EventSet,
    geometry: &Geometry,
    window: &TimeWindow,
    teaser: &TeaserParams,
) -> Vec<PlacedEvent> {
    let (begin, end) = window.visible_range();
    let centre = window.pixel_width() / 2.0;

    events
        .iter()
        .filter(|event| event.intersects(begin, end))
        .filter_map(|event| {
            let Some(geometry) = geometry.get(&event.id()) else {
                trace!("event {} has no geometry", event.id());
                return None;
            };
            let (teaser, more_link_text) = teaser.teaser(event);
            Some(PlacedEvent {
                id: event.id(),
                row: geometry.row,
                top: geometry.top,
                left: centre - window.pixels_for(window.anchor() - event.start()),
                width: geometry.width,
                title: event.title().to_string(),
                teaser,
                more_link_text,
                start: event.start(),
                end: event.end(),
                is_duration: event.is_duration(),
                color: event.color().map(str::to_string),
                link: event.link().map(str::to_string),
                image: event.image().map(str::to_string),
                teaser_image: event.teaser_image().map(str::to_string),
            })
        })
        .collect()
}

/// The events currently shown on a band
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    shown: HashSet<EventId>,
}

impl VisibleSet {
    pub fn contains(&self, id: EventId) -> bool {
        self.shown.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Replace the shown events, returning what entered (in `placed` order)
    /// followed by what left (in ID order)
    pub fn update(&mut self, placed: &[PlacedEvent]) -> Vec<VisibilityEvent> {
        let now: HashSet<EventId> = placed.iter().map(|event| event.id).collect();

        let mut changes: Vec<VisibilityEvent> = placed
            .iter()
            .filter(|event| !self.shown.contains(&event.id))
            .map(|event| VisibilityEvent::Entered(event.id))
            .collect();

        let mut left: Vec<EventId> = self.shown.difference(&now).copied().collect();
        left.sort();
        changes.extend(left.into_iter().map(VisibilityEvent::Left));

        self.shown = now;
        changes
    }

    /// Hide everything
    pub fn clear(&mut self) -> Vec<VisibilityEvent> {
        self.update(&[])
    }
}
