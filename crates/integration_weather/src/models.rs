//! Wire models for the forecast and geocoding APIs

use domain::{DayRecord, GeoLocation, LocationSuggestion};
use serde::{Deserialize, Serialize};

/// Visual Crossing timeline response
///
/// Only `days` is used for the report; the remaining fields are kept for
/// logging.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    /// Address the service resolved the coordinates to
    #[serde(default)]
    pub resolved_address: Option<String>,
    /// IANA timezone of the location
    #[serde(default)]
    pub timezone: Option<String>,
    /// One record per forecast day
    #[serde(default)]
    pub days: Vec<DayRecord>,
}

/// One OpenWeather direct geocoding result
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeocodeResult {
    /// Place name
    pub name: String,
    /// State or region, missing for many countries
    #[serde(default)]
    pub state: Option<String>,
    /// ISO 3166 country code
    pub country: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl GeocodeResult {
    /// Display label `name, state, country`
    #[must_use]
    pub fn label(&self) -> String {
        LocationSuggestion::compose_label(&self.name, self.state.as_deref(), &self.country)
    }

    /// Convert to a suggestion; `None` when the coordinates are out of range
    #[must_use]
    pub fn into_suggestion(self) -> Option<LocationSuggestion> {
        let coordinates = GeoLocation::new(self.lat, self.lon).ok()?;
        Some(LocationSuggestion {
            label: self.label(),
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_tolerates_missing_attributes() {
        let json = r#"{
            "resolvedAddress": "Mannheim, BW, Deutschland",
            "timezone": "Europe/Berlin",
            "days": [
                { "datetime": "2024-01-05", "temp": 41.2, "conditions": "Rain, Overcast" },
                { "datetime": "2024-01-06", "uvindex": null }
            ]
        }"#;
        let response: TimelineResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.days.len(), 2);
        assert_eq!(response.days[0].temp, Some(41.2));
        assert!(response.days[1].uvindex.is_none());
        assert!(response.days[1].conditions.is_none());
    }

    #[test]
    fn timeline_without_days_is_empty() {
        let response: TimelineResponse = serde_json::from_str("{}").unwrap();
        assert!(response.days.is_empty());
    }

    #[test]
    fn geocode_label_with_and_without_state() {
        let with_state: GeocodeResult = serde_json::from_str(
            r#"{"name":"Mannheim","state":"Baden-Württemberg","country":"DE","lat":49.4875,"lon":8.466}"#,
        )
        .unwrap();
        assert_eq!(with_state.label(), "Mannheim, Baden-Württemberg, DE");

        let without: GeocodeResult = serde_json::from_str(
            r#"{"name":"Monaco","country":"MC","lat":43.73,"lon":7.42}"#,
        )
        .unwrap();
        assert_eq!(without.label(), "Monaco, MC");
    }

    #[test]
    fn out_of_range_coordinates_are_dropped() {
        let result = GeocodeResult {
            name: "Nowhere".into(),
            state: None,
            country: "XX".into(),
            lat: 123.0,
            lon: 0.0,
        };
        assert!(result.into_suggestion().is_none());
    }
}
