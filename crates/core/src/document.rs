// SPDX-License-Identifier: MIT

//!
//! Loading events from an event document.
//!
//! An event document is JSON of the form:
//!
//! ```json
//! {
//!     "events": [
//!         {
//!             "start": "1969",
//!             "end": "07/24/1969",
//!             "isDuration": "true",
//!             "title": "Apollo 11",
//!             "color": "Blue",
//!             "link": "https://example.org/apollo-11",
//!             "image": "apollo.png",
//!             "teaserImage": "apollo-small.png",
//!             "rowOverride": "2",
//!             "description": "First crewed Moon landing"
//!         }
//!     ]
//! }
//! ```
//!
//! Only `start` and `title` are required.
//!

use crate::{
    DateParseError, EventError, EventId, EventSet, TimelineEvent, Title, TitleError,
    parse_date_time,
};
use chrono::NaiveDateTime;
use log::{debug, info};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Errors that can arise when loading an event document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unable to read event document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Event {index} has an invalid date: {source}")]
    Date {
        index: usize,
        source: DateParseError,
    },

    #[error("Event {index} has an invalid title: {source}")]
    Title { index: usize, source: TitleError },

    #[error("Event {index} is invalid: {source}")]
    Event { index: usize, source: EventError },

    #[error("Event {index} has an invalid ID: {source}")]
    Id { index: usize, source: uuid::Error },

    #[error("Event {index} has an invalid row override `{value}`")]
    RowOverride { index: usize, value: String },
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: Option<String>,
    start: String,
    end: Option<String>,
    title: String,
    color: Option<String>,
    link: Option<String>,
    image: Option<String>,
    teaser_image: Option<String>,
    row_override: Option<LooseValue>,
    is_duration: Option<LooseValue>,
    description: Option<String>,
}

/// Documents written by hand mix `"true"` and `true`, `"2"` and `2`
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Bool(bool),
    Number(i64),
    Float(f64),
    Text(String),
}

/// Read and parse an event document file
pub fn load_event_document_file<P: AsRef<Path>>(path: P) -> Result<EventSet, DocumentError> {
    info!("Loading event document {}", path.as_ref().display());
    let json = fs::read_to_string(path)?;
    load_event_document(&json)
}

/// Parse an event document, returning the events sorted by start date
pub fn load_event_document(json: &str) -> Result<EventSet, DocumentError> {
    let document: RawDocument = serde_json::from_str(json)?;
    let events = document
        .events
        .into_iter()
        .enumerate()
        .map(|(index, raw)| event_from_raw(index, raw))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} events", events.len());
    Ok(EventSet::new(events))
}

fn event_from_raw(index: usize, raw: RawEvent) -> Result<TimelineEvent, DocumentError> {
    let date = |value: &str| -> Result<NaiveDateTime, DocumentError> {
        parse_date_time(value).map_err(|source| DocumentError::Date { index, source })
    };

    let title = Title::from(&raw.title).map_err(|source| DocumentError::Title { index, source })?;
    let start = date(&raw.start)?;
    let is_duration = match raw.is_duration {
        Some(LooseValue::Bool(value)) => value,
        Some(LooseValue::Text(value)) => value.trim().eq_ignore_ascii_case("true"),
        Some(LooseValue::Number(_) | LooseValue::Float(_)) | None => false,
    };

    let event = if is_duration {
        // A missing or too short end date means the event is really an instant
        let end = match raw.end.as_deref().map(str::trim) {
            Some(end) if end.len() >= 4 => date(end)?,
            _ => start,
        };
        TimelineEvent::duration(title, start, end)
            .map_err(|source| DocumentError::Event { index, source })?
    } else {
        TimelineEvent::instant(title, start)
    };

    let event = match raw.id {
        Some(id) => event.with_id(
            id.parse::<EventId>()
                .map_err(|source| DocumentError::Id { index, source })?,
        ),
        None => event,
    };

    let row_override = row_override(index, raw.row_override)?;
    debug!("event {index} `{}` starts {start}", event.title());

    Ok(event
        .with_description(normalise_description(
            raw.description.as_deref().unwrap_or_default(),
        ))
        .with_row_override(row_override)
        .with_color(non_empty(raw.color))
        .with_link(non_empty(raw.link))
        .with_image(non_empty(raw.image))
        .with_teaser_image(non_empty(raw.teaser_image)))
}

/// An empty value or `-1` means "assign automatically"
fn row_override(index: usize, value: Option<LooseValue>) -> Result<Option<usize>, DocumentError> {
    let invalid = |value: String| DocumentError::RowOverride { index, value };
    let number = match value {
        None => return Ok(None),
        Some(LooseValue::Number(number)) => number,
        // Whole numbers written as `2.0` are fine
        Some(LooseValue::Float(number)) if number.fract() == 0.0 && number.abs() < 1e15 => {
            number as i64
        }
        Some(LooseValue::Float(number)) => return Err(invalid(number.to_string())),
        Some(LooseValue::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(LooseValue::Text(text)) => text.trim().parse::<i64>().map_err(|_| invalid(text))?,
        Some(LooseValue::Bool(value)) => return Err(invalid(value.to_string())),
    };
    match number {
        -1 => Ok(None),
        number => usize::try_from(number)
            .map(Some)
            .map_err(|_| invalid(number.to_string())),
    }
}

/// Line breaks become spaces and runs of whitespace collapse to one space
fn normalise_description(description: &str) -> String {
    description.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
