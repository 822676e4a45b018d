//! Column metadata for the forecast report
//!
//! Static mapping from forecast attribute keys to their display labels and
//! the formatting rule applied to each cell.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{CellValue, DayRecord, RawValue};
use crate::formatting::{fahrenheit_to_celsius, force_text, format_iso_date_display};

/// How a raw attribute value becomes a cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormattingRule {
    /// ISO date rendered as `'5 January, 2024`
    DateDisplay,
    /// Fahrenheit number converted to Celsius with one decimal
    FahrenheitToCelsius,
    /// Clock time kept verbatim as text
    LiteralTimeText,
    /// Written as received
    Passthrough,
}

/// Attributes requested from the forecast API, in report column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKey {
    Datetime,
    Conditions,
    Temp,
    Humidity,
    PrecipProb,
    Precip,
    WindSpeed,
    CloudCover,
    TempMax,
    TempMin,
    Description,
    Pressure,
    Visibility,
    UvIndex,
    Sunrise,
    Sunset,
}

impl ColumnKey {
    /// Every column, left to right
    pub const ALL: [Self; 16] = [
        Self::Datetime,
        Self::Conditions,
        Self::Temp,
        Self::Humidity,
        Self::PrecipProb,
        Self::Precip,
        Self::WindSpeed,
        Self::CloudCover,
        Self::TempMax,
        Self::TempMin,
        Self::Description,
        Self::Pressure,
        Self::Visibility,
        Self::UvIndex,
        Self::Sunrise,
        Self::Sunset,
    ];

    /// Attribute name used by the forecast API
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Datetime => "datetime",
            Self::Conditions => "conditions",
            Self::Temp => "temp",
            Self::Humidity => "humidity",
            Self::PrecipProb => "precipprob",
            Self::Precip => "precip",
            Self::WindSpeed => "windspeed",
            Self::CloudCover => "cloudcover",
            Self::TempMax => "tempmax",
            Self::TempMin => "tempmin",
            Self::Description => "description",
            Self::Pressure => "pressure",
            Self::Visibility => "visibility",
            Self::UvIndex => "uvindex",
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
        }
    }

    /// Header text shown in the report table
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Datetime => "Date",
            Self::Conditions => "Conditions",
            Self::Temp => "Avg Temp. (°C)",
            Self::Humidity => "Humidity (%)",
            Self::PrecipProb => "Precip Prob. (%)",
            Self::Precip => "Precip (in.)",
            Self::WindSpeed => "Wind (km\\hr)",
            Self::CloudCover => "Cloud Cover (%)",
            Self::TempMax => "Max Temp. (°C)",
            Self::TempMin => "Min Temp. (°C)",
            Self::Description => "Description",
            Self::Pressure => "Pressure (mbar)",
            Self::Visibility => "Visibility (km)",
            Self::UvIndex => "UV Index",
            Self::Sunrise => "Sunrise",
            Self::Sunset => "Sunset",
        }
    }

    /// Formatting rule for this column
    #[must_use]
    pub const fn rule(self) -> FormattingRule {
        match self {
            Self::Datetime => FormattingRule::DateDisplay,
            Self::Temp | Self::TempMax | Self::TempMin => FormattingRule::FahrenheitToCelsius,
            Self::Sunrise | Self::Sunset => FormattingRule::LiteralTimeText,
            _ => FormattingRule::Passthrough,
        }
    }

    /// Zero-based position in the report table
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|key| *key == self)
            .unwrap_or_default()
    }

    /// Look a column up by its API attribute name
    #[must_use]
    pub fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.api_name() == name)
    }

    /// Comma-joined attribute list for the `elements` query parameter
    #[must_use]
    pub fn elements_param() -> String {
        Self::ALL
            .iter()
            .map(|key| key.api_name())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Header row of the report table
    #[must_use]
    pub fn header_labels() -> Vec<String> {
        Self::ALL.iter().map(|key| key.label().to_string()).collect()
    }

    /// Produce the cell for this column from a day record
    #[must_use]
    pub fn format(self, day: &DayRecord) -> CellValue {
        let raw = day.value(self);
        match (self.rule(), raw) {
            (_, RawValue::Missing) => CellValue::Empty,
            (FormattingRule::DateDisplay, RawValue::Text(text)) => {
                match format_iso_date_display(&text) {
                    Ok(display) => CellValue::Text(force_text(&display)),
                    Err(_) => CellValue::Text(force_text(&text)),
                }
            },
            (FormattingRule::FahrenheitToCelsius, RawValue::Number(value)) => {
                CellValue::Number(fahrenheit_to_celsius(value))
            },
            (FormattingRule::LiteralTimeText, RawValue::Text(text)) => {
                CellValue::Text(force_text(&text))
            },
            (_, RawValue::Number(value)) => CellValue::Number(value),
            (_, RawValue::Text(text)) => CellValue::Text(text),
        }
    }

    /// Build a whole report row from a day record
    #[must_use]
    pub fn row_for(day: &DayRecord) -> Vec<CellValue> {
        Self::ALL.iter().map(|key| key.format(day)).collect()
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}
