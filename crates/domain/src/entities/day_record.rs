//! Forecast day record
//!
//! One day of weather attributes as returned by the forecast API. Values
//! are kept in the API's units (Fahrenheit, inches); conversion happens
//! when the record is laid out as a report row.

use serde::{Deserialize, Serialize};

use crate::columns::ColumnKey;

/// Raw attribute value before formatting
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Missing,
}

impl From<Option<&String>> for RawValue {
    fn from(value: Option<&String>) -> Self {
        value.map_or(Self::Missing, |text| Self::Text(text.clone()))
    }
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

/// A single forecast day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Date as `YYYY-MM-DD`
    pub datetime: Option<String>,
    /// Comma-joined condition summary, e.g. `Rain, Partially cloudy`
    pub conditions: Option<String>,
    /// Mean temperature (°F)
    pub temp: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<f64>,
    /// Precipitation probability (%)
    pub precipprob: Option<f64>,
    /// Precipitation (in.)
    pub precip: Option<f64>,
    /// Wind speed
    pub windspeed: Option<f64>,
    /// Cloud cover (%)
    pub cloudcover: Option<f64>,
    /// Maximum temperature (°F)
    pub tempmax: Option<f64>,
    /// Minimum temperature (°F)
    pub tempmin: Option<f64>,
    /// Free-text day description
    pub description: Option<String>,
    /// Sea level pressure (mbar)
    pub pressure: Option<f64>,
    /// Visibility
    pub visibility: Option<f64>,
    /// UV index
    pub uvindex: Option<f64>,
    /// Local sunrise as `HH:MM:SS`
    pub sunrise: Option<String>,
    /// Local sunset as `HH:MM:SS`
    pub sunset: Option<String>,
}

impl DayRecord {
    /// Raw value of one attribute
    #[must_use]
    pub fn value(&self, key: ColumnKey) -> RawValue {
        match key {
            ColumnKey::Datetime => self.datetime.as_ref().into(),
            ColumnKey::Conditions => self.conditions.as_ref().into(),
            ColumnKey::Temp => self.temp.into(),
            ColumnKey::Humidity => self.humidity.into(),
            ColumnKey::PrecipProb => self.precipprob.into(),
            ColumnKey::Precip => self.precip.into(),
            ColumnKey::WindSpeed => self.windspeed.into(),
            ColumnKey::CloudCover => self.cloudcover.into(),
            ColumnKey::TempMax => self.tempmax.into(),
            ColumnKey::TempMin => self.tempmin.into(),
            ColumnKey::Description => self.description.as_ref().into(),
            ColumnKey::Pressure => self.pressure.into(),
            ColumnKey::Visibility => self.visibility.into(),
            ColumnKey::UvIndex => self.uvindex.into(),
            ColumnKey::Sunrise => self.sunrise.as_ref().into(),
            ColumnKey::Sunset => self.sunset.as_ref().into(),
        }
    }
}
