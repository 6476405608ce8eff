// SPDX-License-Identifier: MIT

//!
//! The layout engine: the pure calculations behind a band.  Nothing here keeps
//! state between calls apart from [`TimeWindow`] and [`VisibleSet`].
//!

mod events;
mod helpers;
mod layout_params;
mod positions;
mod rows;
mod visibility;
mod window;

pub(crate) use helpers::*;

pub use events::*;
pub use layout_params::*;
pub use positions::*;
pub use rows::*;
pub use visibility::*;
pub use window::*;

use thiserror::Error;
use timeline_bands_core::EventId;

/// Errors that can arise when laying out events
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Event height must be positive (and finite)
    #[error("Maximum event height must be positive, not {0}")]
    EventHeight(f64),

    /// Margins can't be negative
    #[error("Margins must not be negative (top {top}, bottom {bottom})")]
    Margins { top: f64, bottom: f64 },

    /// The band is too short to hold a single row of events
    #[error("A band {pixel_height}px high has no room for any rows of events")]
    NoRoom { pixel_height: f64 },

    /// Rows can't be assigned with no rows to assign
    #[error("Row count must be at least 1")]
    ZeroRowCount,

    /// Positions were requested for an event that wasn't given a row
    #[error("Event {0} has not been assigned a row")]
    MissingRow(EventId),
}
