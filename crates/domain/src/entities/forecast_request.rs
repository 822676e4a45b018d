//! Forecast request parameters

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ForecastDays, GeoLocation};

/// Everything needed to fetch one report's worth of forecast days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Where to fetch the forecast for
    pub coordinates: GeoLocation,
    /// Location text used as the report title
    pub location_text: String,
    /// First forecast day
    pub start_date: NaiveDate,
    /// Length of the report
    pub days: ForecastDays,
}

impl ForecastRequest {
    /// Create a request
    #[must_use]
    pub fn new(
        coordinates: GeoLocation,
        location_text: impl Into<String>,
        start_date: NaiveDate,
        days: ForecastDays,
    ) -> Self {
        Self {
            coordinates,
            location_text: location_text.into(),
            start_date,
            days,
        }
    }

    /// `start_date + days`
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.days.value())))
            .unwrap_or(NaiveDate::MAX)
    }
}
