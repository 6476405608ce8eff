// SPDX-License-Identifier: MIT

//!
//! *Part of the timeline-bands project*
//!
//! This crate defines the basic datatypes used across timeline-bands: the
//! calendar that maps datetimes to column indexes at a given granularity, the
//! event types that get plotted, and the loading of event documents.
//!
//! This crate aims to provide APIs for each type so that if a type is
//! instantiated, the developer can be sure it's valid.
//!

mod calendar;
mod date;
mod document;
mod event;
mod event_set;
mod id;
mod title;

pub use calendar::*;
pub use date::*;
pub use document::*;
pub use event::*;
pub use event_set::*;
pub use id::*;
pub use title::*;
