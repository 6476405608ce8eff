// SPDX-License-Identifier: MIT

//!
//! Layout params
//!

use super::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use timeline_bands_core::TimelineEvent;

/// Space left above the first row of events
pub const TOP_MARGIN: f64 = 5.0;

/// Space left below the last row so that events don't run over the column
/// captions
pub const BOTTOM_MARGIN: f64 = 5.0;

/// The vertical measurements used to stack events into rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub top_margin: f64,
    pub bottom_margin: f64,

    /// The height of one row of events
    pub max_event_height: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            top_margin: TOP_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            max_event_height: 20.0,
        }
    }
}

impl LayoutParams {
    /// Default margins with the given row height
    pub fn with_max_event_height(max_event_height: f64) -> Self {
        LayoutParams {
            max_event_height,
            ..LayoutParams::default()
        }
    }

    /// Check the params can be laid out with
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.max_event_height.is_finite() && self.max_event_height > 0.0) {
            return Err(LayoutError::EventHeight(self.max_event_height));
        }
        if !(self.top_margin >= 0.0 && self.bottom_margin >= 0.0) {
            return Err(LayoutError::Margins {
                top: self.top_margin,
                bottom: self.bottom_margin,
            });
        }
        Ok(())
    }
}

/// Descriptions longer than this many characters are cut short
pub const DEFAULT_TEASER_SIZE: usize = 80;

/// Offered as a link when a description has been cut short
pub const DEFAULT_MORE_LINK_TEXT: &str = " More...";

/// How descriptions are shortened for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeaserParams {
    /// 0 means descriptions are never cut
    pub teaser_size: usize,
    pub more_link_text: String,
}

impl Default for TeaserParams {
    fn default() -> Self {
        TeaserParams {
            teaser_size: DEFAULT_TEASER_SIZE,
            more_link_text: DEFAULT_MORE_LINK_TEXT.to_string(),
        }
    }
}

impl TeaserParams {
    /// The event's teaser, and the link text to show if it was cut
    pub fn teaser(&self, event: &TimelineEvent) -> (String, Option<String>) {
        let cut = self.teaser_size > 0 && event.description().chars().count() > self.teaser_size;
        let link_text = cut.then(|| self.more_link_text.clone());
        (event.teaser(self.teaser_size), link_text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate() {
        assert!(LayoutParams::default().validate().is_ok());
        assert_eq!(
            LayoutParams::with_max_event_height(0.0).validate(),
            Err(LayoutError::EventHeight(0.0))
        );
        assert!(LayoutParams::with_max_event_height(f64::NAN).validate().is_err());

        let params = LayoutParams {
            top_margin: -1.0,
            ..LayoutParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn teasers() {
        let title = timeline_bands_core::Title::from("Apollo 11").unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(1969, 7, 16)
            .unwrap()
            .and_hms_opt(13, 32, 0)
            .unwrap();
        let event = TimelineEvent::instant(title, start).with_description("First crewed landing");

        let params = TeaserParams {
            teaser_size: 5,
            more_link_text: String::from("More"),
        };
        assert_eq!(
            params.teaser(&event),
            (String::from("First..."), Some(String::from("More")))
        );

        let params = TeaserParams {
            teaser_size: 0,
            ..TeaserParams::default()
        };
        assert_eq!(params.teaser(&event), (String::from("First crewed landing"), None));
        assert_eq!(
            TeaserParams::default().teaser(&event),
            (String::from("First crewed landing"), None)
        );
    }
}
