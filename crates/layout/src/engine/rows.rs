// SPDX-License-Identifier: MIT

//!
//! Stacking events into rows
//!

use super::{LayoutError, LayoutParams};
use log::{debug, warn};
use std::collections::HashMap;
use timeline_bands_core::{EventId, EventSet, MIN_DATE_TIME};

/// The row each event is drawn in
pub type RowAssignment = HashMap<EventId, usize>;

/// How many rows of events fit in a band `pixel_height` high
pub fn row_capacity(pixel_height: f64, params: &LayoutParams) -> Result<usize, LayoutError> {
    params.validate()?;
    let rows = ((pixel_height - params.top_margin - params.bottom_margin)
        / params.max_event_height)
        .floor();
    if rows.is_nan() || rows < 1.0 {
        return Err(LayoutError::NoRoom { pixel_height });
    }
    Ok(rows as usize)
}

/// Put each event (in start order) in the row that has been free the
/// longest, or the row it asks for.  When every row is taken events overlap
/// in whichever row frees up first.
pub fn assign_rows(events: &EventSet, row_count: usize) -> Result<RowAssignment, LayoutError> {
    if row_count == 0 {
        return Err(LayoutError::ZeroRowCount);
    }

    // When each row's last event ends
    let mut row_ends = vec![*MIN_DATE_TIME; row_count];
    let mut rows = RowAssignment::with_capacity(events.len());

    for event in events {
        let row = match event.row_override() {
            Some(row) => {
                match row_ends.get_mut(row) {
                    Some(end) => *end = event.end(),
                    None => warn!(
                        "event `{}` asks for row {row} but there are only {row_count}",
                        event.title()
                    ),
                }
                row
            }
            None => {
                // The first of equally early rows
                let row = row_ends
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, end)| **end)
                    .map(|(row, _)| row)
                    .unwrap_or_default();
                row_ends[row] = event.end();
                row
            }
        };
        rows.insert(event.id(), row);
    }

    debug!("assigned {} events to {row_count} rows", rows.len());
    Ok(rows)
}
