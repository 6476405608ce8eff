// SPDX-License-Identifier: MIT

//!
//! Event titles
//!

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can arise in relation to a [`Title`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title cannot be empty")]
    Empty,
}

/// An event title.  Any string that isn't empty once trimmed of leading and
/// trailing whitespace.
#[derive(derive_more::Display, Serialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Create a new title if it will be valid
    pub fn from<S: ToString>(title: S) -> Result<Self, TitleError> {
        let title = title.to_string();
        if title.trim().is_empty() {
            Err(TitleError::Empty)
        } else {
            Ok(Title(title.trim().to_string()))
        }
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Title {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Title::from(string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from() {
        assert!(Title::from("").is_err());
        assert!(Title::from("  ").is_err());
        let ok_1 = Title::from("Moon landing").unwrap();
        let ok_2 = Title::from(" Moon landing ").unwrap();
        assert_eq!(ok_1, ok_2)
    }

    #[test]
    fn deserialize() {
        let title: Title = serde_json::from_str(r#"" Apollo 11 ""#).unwrap();
        assert_eq!(title.as_str(), "Apollo 11");
        assert!(serde_json::from_str::<Title>(r#""   ""#).is_err());
    }
}
