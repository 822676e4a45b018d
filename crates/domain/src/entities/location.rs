//! Location selection entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// The location currently entered in the search box
///
/// Coordinates are only present once a concrete suggestion was accepted;
/// free text typed by the user carries none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSelection {
    /// Accepted coordinates
    pub coordinates: Option<GeoLocation>,
    /// Text shown in the search box
    pub display_text: String,
}

impl LocationSelection {
    /// Provisional selection from typed text
    #[must_use]
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            coordinates: None,
            display_text: text.into(),
        }
    }

    /// Selection from an accepted suggestion
    #[must_use]
    pub fn from_suggestion(suggestion: &LocationSuggestion) -> Self {
        Self {
            coordinates: Some(suggestion.coordinates),
            display_text: suggestion.label.clone(),
        }
    }

    /// Check whether a concrete suggestion was accepted
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// One geocoding candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    /// `name, state, country` (state omitted when unknown)
    pub label: String,
    /// Coordinates carried along with the label
    pub coordinates: GeoLocation,
}

impl LocationSuggestion {
    /// Compose the display label from geocoder fields
    #[must_use]
    pub fn compose_label(name: &str, state: Option<&str>, country: &str) -> String {
        match state.filter(|s| !s.is_empty()) {
            Some(state) => format!("{name}, {state}, {country}"),
            None => format!("{name}, {country}"),
        }
    }
}

impl fmt::Display for LocationSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
