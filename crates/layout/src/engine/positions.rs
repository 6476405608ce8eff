// SPDX-License-Identifier: MIT

//!
//! Event geometry
//!

use super::{LayoutError, LayoutParams, RowAssignment, TimeWindow};
use serde::Serialize;
use std::collections::HashMap;
use timeline_bands_core::{EventId, EventSet};

/// Events narrower than this are widened so they can still be seen
pub const MIN_EVENT_PIXEL_WIDTH: f64 = 3.0;

/// Where an event sits vertically, and how wide it is.  The horizontal
/// position depends on the anchor so is worked out when the event is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventGeometry {
    pub row: usize,
    pub top: f64,
    pub width: f64,
}

pub type Geometry = HashMap<EventId, EventGeometry>;

/// Work out the geometry of every event.  Every event must have a row.
pub fn compute_positions(
    events: &EventSet,
    rows: &RowAssignment,
    window: &TimeWindow,
    params: &LayoutParams,
) -> Result<Geometry, LayoutError> {
    params.validate()?;
    events
        .iter()
        .map(|event| {
            let row = *rows
                .get(&event.id())
                .ok_or(LayoutError::MissingRow(event.id()))?;
            let geometry = EventGeometry {
                row,
                top: row as f64 * params.max_event_height + params.top_margin,
                width: window.pixels_for(event.span()).max(MIN_EVENT_PIXEL_WIDTH),
            };
            Ok((event.id(), geometry))
        })
        .collect()
}
