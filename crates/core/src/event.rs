// SPDX-License-Identifier: MIT

//!
//! The timeline event type
//!

use crate::{EventId, Title};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

/// Errors that can arise in relation to a [`TimelineEvent`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event ends (`{end}`) before it starts (`{start}`)")]
    Dates {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Something that happened at an instant, or over a period, that is plotted
/// on a timeline.
///
/// The colour, link, and image fields are opaque strings that are passed
/// through to whatever draws the event.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TimelineEvent {
    id: EventId,
    title: Title,
    description: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_duration: bool,

    /// Forces the event into a row, bypassing automatic row assignment
    row_override: Option<usize>,

    color: Option<String>,
    link: Option<String>,
    image: Option<String>,
    teaser_image: Option<String>,
}

impl TimelineEvent {
    /// An event without a duration (it ends when it starts)
    pub fn instant(title: Title, start: NaiveDateTime) -> Self {
        Self {
            id: EventId::new(),
            title,
            description: String::new(),
            start,
            end: start,
            is_duration: false,
            row_override: None,
            color: None,
            link: None,
            image: None,
            teaser_image: None,
        }
    }

    /// An event spanning `start..=end`
    pub fn duration(
        title: Title,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        if end < start {
            return Err(EventError::Dates { start, end });
        }
        let mut event = Self::instant(title, start);
        event.end = end;
        event.is_duration = true;
        Ok(event)
    }

    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_row_override(mut self, row: Option<usize>) -> Self {
        self.row_override = row;
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn with_teaser_image(mut self, teaser_image: Option<String>) -> Self {
        self.teaser_image = teaser_image;
        self
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn is_duration(&self) -> bool {
        self.is_duration
    }

    pub fn row_override(&self) -> Option<usize> {
        self.row_override
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn teaser_image(&self) -> Option<&str> {
        self.teaser_image.as_deref()
    }

    /// How long the event lasts (zero for instants)
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Whether any part of the event falls within `begin..=end`.  Touching
    /// either end counts.
    pub fn intersects(&self, begin: NaiveDateTime, end: NaiveDateTime) -> bool {
        let entirely_before = self.start < begin && self.end < begin;
        let entirely_after = self.start > end && self.end > end;
        !(entirely_before || entirely_after)
    }

    /// The description cut down to at most `size` characters (with a trailing
    /// `...` if it was cut).  A size of 0 means no limit.
    pub fn teaser(&self, size: usize) -> String {
        if size > 0 && self.description.chars().count() > size {
            let mut teaser: String = self.description.chars().take(size).collect();
            teaser.push_str("...");
            teaser
        } else {
            self.description.clone()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn day(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn title() -> Title {
        Title::from("Event").unwrap()
    }

    #[test]
    fn constructors() {
        let instant = TimelineEvent::instant(title(), day(3));
        assert_eq!(instant.start(), instant.end());
        assert!(!instant.is_duration());
        assert_eq!(instant.span(), Duration::zero());

        let duration = TimelineEvent::duration(title(), day(3), day(5)).unwrap();
        assert!(duration.is_duration());
        assert_eq!(duration.span(), Duration::days(2));

        assert_eq!(
            TimelineEvent::duration(title(), day(5), day(3)),
            Err(EventError::Dates {
                start: day(5),
                end: day(3)
            })
        );
    }

    #[test]
    fn intersects() {
        let event = TimelineEvent::duration(title(), day(3), day(5)).unwrap();
        assert!(event.intersects(day(1), day(3)));
        assert!(event.intersects(day(4), day(4)));
        assert!(event.intersects(day(5), day(9)));
        assert!(!event.intersects(day(6), day(9)));
        assert!(!event.intersects(day(1), day(2)));
    }

    #[test]
    fn teaser() {
        let event = TimelineEvent::instant(title(), day(1)).with_description("abcdefgh");
        assert_eq!(event.teaser(0), "abcdefgh");
        assert_eq!(event.teaser(8), "abcdefgh");
        assert_eq!(event.teaser(3), "abc...");
    }
}
