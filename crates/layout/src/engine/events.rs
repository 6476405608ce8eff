// SPDX-License-Identifier: MIT

//!
//! Events
//!

use serde::Serialize;
use std::fmt::Debug;
use timeline_bands_core::EventId;

/// Changes to the set of events drawn on a band.  Whatever draws the band
/// creates a visual for `Entered` events and releases it for `Left` ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VisibilityEvent {
    Entered(EventId),
    Left(EventId),
}
