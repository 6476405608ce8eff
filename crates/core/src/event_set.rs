// SPDX-License-Identifier: MIT

//!
//! The set of events drawn in one rendering pass
//!

use crate::{EventId, TimelineEvent};
use chrono::NaiveDateTime;
use log::{debug, warn};
use std::collections::HashSet;

/// Owns every [`TimelineEvent`] for one rendering pass, ordered by start date.
/// Events that start together keep the order they were added in.
///
/// The set is rebuilt wholesale when the data changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSet {
    events: Vec<TimelineEvent>,
}

impl EventSet {
    /// Create a set, sorting the events by start date.  Only the first event
    /// with any given ID is kept.
    pub fn new(mut events: Vec<TimelineEvent>) -> Self {
        let mut seen = HashSet::with_capacity(events.len());
        events.retain(|event| {
            let first = seen.insert(event.id());
            if !first {
                warn!("dropping event `{}`, ID {} already used", event.title(), event.id());
            }
            first
        });

        // Stable, so ties keep insertion order
        events.sort_by_key(|event| event.start());
        debug!("event set built with {} events", events.len());
        Self { events }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Find an event by ID
    pub fn get(&self, id: EventId) -> Option<&TimelineEvent> {
        self.events.iter().find(|event| event.id() == id)
    }

    /// The earliest start date of any event
    pub fn earliest_start(&self) -> Option<NaiveDateTime> {
        self.events.first().map(|event| event.start())
    }

    /// The latest end date of any event
    pub fn latest_end(&self) -> Option<NaiveDateTime> {
        self.events.iter().map(|event| event.end()).max()
    }
}

impl FromIterator<TimelineEvent> for EventSet {
    fn from_iter<I: IntoIterator<Item = TimelineEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a TimelineEvent;
    type IntoIter = std::slice::Iter<'a, TimelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
