// SPDX-License-Identifier: MIT

//!
//! Tray config
//!
//! A JSON document describing the bands of a tray, e.g.
//!
//! ```json
//! {
//!     "min_date": "1900",
//!     "max_date": "2100",
//!     "initial_date": "today",
//!     "pixel_width": 1000.0,
//!     "teaser_size": 80,
//!     "more_link_text": " More...",
//!     "bands": [
//!         { "granularity": "years", "column_count": 10, "pixel_height": 60.0, "max_event_height": 4.0 },
//!         { "granularity": "months", "column_count": 7, "pixel_height": 300.0, "max_event_height": 20.0, "is_main": true }
//!     ]
//! }
//! ```
//!
//! Every field is optional.
//!

use crate::band::Band;
use crate::engine::{
    BOTTOM_MARGIN, DEFAULT_MORE_LINK_TEXT, DEFAULT_TEASER_SIZE, LayoutError, LayoutParams,
    TOP_MARGIN, TeaserParams, TimeWindow, WindowError,
};
use crate::tray::{Tray, TrayError};
use chrono::{Local, NaiveDateTime};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use timeline_bands_core::{
    CalendarError, DateParseError, Granularity, MAX_DATE_TIME, MIN_DATE_TIME, TimelineCalendar,
    parse_date_time_relative_to,
};

/// Errors that can arise when loading a config or building a tray from it
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config has an invalid date: {0}")]
    Date(#[from] DateParseError),

    #[error("{0}")]
    Calendar(#[from] CalendarError),

    #[error("Band {index}: {source}")]
    Window { index: usize, source: WindowError },

    #[error("Band {index}: {source}")]
    Layout { index: usize, source: LayoutError },

    #[error("{0}")]
    Tray(#[from] TrayError),
}

/// The config for a whole tray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    /// Earliest date that can be shown (the earliest representable date if
    /// not given)
    pub min_date: Option<String>,

    /// Latest date that can be shown (the latest representable date if not
    /// given)
    pub max_date: Option<String>,

    /// The date shown when the tray is first drawn
    pub initial_date: String,

    /// Shared by every band
    pub pixel_width: f64,

    pub top_margin: f64,
    pub bottom_margin: f64,

    /// Descriptions longer than this are cut short (0 for never)
    pub teaser_size: usize,

    /// Shown with descriptions that have been cut short
    pub more_link_text: String,

    /// Top to bottom
    pub bands: Vec<BandConfig>,
}

/// The config for one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    pub granularity: Granularity,
    pub column_count: usize,
    pub pixel_height: f64,
    pub max_event_height: f64,

    #[serde(default)]
    pub is_main: bool,
}

impl Default for TrayConfig {
    fn default() -> Self {
        TrayConfig {
            min_date: None,
            max_date: None,
            initial_date: String::from("today"),
            pixel_width: 1000.0,
            top_margin: TOP_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            teaser_size: DEFAULT_TEASER_SIZE,
            more_link_text: DEFAULT_MORE_LINK_TEXT.to_string(),
            bands: vec![
                BandConfig {
                    granularity: Granularity::Years,
                    column_count: 10,
                    pixel_height: 60.0,
                    max_event_height: 4.0,
                    is_main: false,
                },
                BandConfig {
                    granularity: Granularity::Months,
                    column_count: 7,
                    pixel_height: 300.0,
                    max_event_height: 20.0,
                    is_main: true,
                },
            ],
        }
    }
}

impl TrayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        info!("Loading config {}", path.as_ref().display());
        let data = fs::read_to_string(path)?;
        let config: TrayConfig = serde_json::from_str(&data)?;
        info!("Config loaded = {config:?}");
        Ok(config)
    }

    /// Build a tray, resolving relative dates against the local clock
    pub fn build(&self) -> Result<Tray, ConfigError> {
        self.build_at(Local::now().naive_local())
    }

    /// Build a tray, resolving relative dates (`today` etc) against `now`
    pub fn build_at(&self, now: NaiveDateTime) -> Result<Tray, ConfigError> {
        let date = |value: &Option<String>, default: NaiveDateTime| match value {
            Some(value) => parse_date_time_relative_to(value, now),
            None => Ok(default),
        };
        let min_date = date(&self.min_date, *MIN_DATE_TIME)?;
        let max_date = date(&self.max_date, *MAX_DATE_TIME)?;
        let initial_date = parse_date_time_relative_to(&self.initial_date, now)?;
        let teaser = TeaserParams {
            teaser_size: self.teaser_size,
            more_link_text: self.more_link_text.clone(),
        };

        let bands = self
            .bands
            .iter()
            .enumerate()
            .map(|(index, band)| {
                let calendar = TimelineCalendar::with_bounds(band.granularity, min_date, max_date)?;
                let window = TimeWindow::new(
                    calendar,
                    initial_date,
                    band.column_count,
                    self.pixel_width,
                    band.pixel_height,
                )
                .map_err(|source| ConfigError::Window { index, source })?;
                let params = LayoutParams {
                    top_margin: self.top_margin,
                    bottom_margin: self.bottom_margin,
                    max_event_height: band.max_event_height,
                };
                Band::new(window, params, band.is_main)
                    .map(|band| band.with_teaser(teaser.clone()))
                    .map_err(|source| ConfigError::Layout { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Tray::new(bands)?)
    }
}
