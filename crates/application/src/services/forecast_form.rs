//! Forecast form state and validation
//!
//! Holds what the user entered before a report is generated. Validation is
//! presence-only: a location picked from the suggestions and a start date.

use chrono::{Days, NaiveDate};
use domain::{DomainError, ForecastDays, ForecastRequest, LocationSelection};

/// Shown under the location box when no suggestion was accepted
pub const LOCATION_REQUIRED: &str = "Required. Make sure to select from the option";

/// Shown under the date picker when no date was picked
pub const DATE_REQUIRED: &str = "Required";

/// Latest start date offered, counted from today
pub const MAX_START_OFFSET_DAYS: u64 = 9;

/// Field-level validation messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    /// Location field message
    pub location: Option<&'static str>,
    /// Start date field message
    pub start_date: Option<&'static str>,
}

impl FormErrors {
    /// Check whether any field has an error
    #[must_use]
    pub const fn any(&self) -> bool {
        self.location.is_some() || self.start_date.is_some()
    }
}

/// The report request form
#[derive(Debug, Clone, Default)]
pub struct ForecastForm {
    location: LocationSelection,
    start_date: Option<NaiveDate>,
    days: ForecastDays,
    submitted: bool,
}

impl ForecastForm {
    /// Empty form: no location, no date, one day
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current location selection
    #[must_use]
    pub const fn location(&self) -> &LocationSelection {
        &self.location
    }

    /// Replace the location selection
    pub fn set_location(&mut self, location: LocationSelection) {
        self.location = location;
    }

    /// Picked start date
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Pick a start date within the picker bounds relative to `today`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the date is before today or
    /// more than nine days ahead.
    pub fn set_start_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
        let (min, max) = Self::date_bounds(today);
        if date < min || date > max {
            return Err(DomainError::ValidationError(format!(
                "start date {date} must be between {min} and {max}"
            )));
        }
        self.start_date = Some(date);
        Ok(())
    }

    /// Clear the start date
    pub fn clear_start_date(&mut self) {
        self.start_date = None;
    }

    /// Report length
    #[must_use]
    pub const fn days(&self) -> ForecastDays {
        self.days
    }

    /// Set the report length, clamped into 1..=5
    pub fn set_days(&mut self, days: u8) {
        self.days = ForecastDays::clamped(days);
    }

    /// Earliest and latest start date selectable on `today`
    #[must_use]
    pub fn date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let max = today
            .checked_add_days(Days::new(MAX_START_OFFSET_DAYS))
            .unwrap_or(today);
        (today, max)
    }

    /// Validation messages; empty until the form has been submitted once
    #[must_use]
    pub fn errors(&self) -> FormErrors {
        if !self.submitted {
            return FormErrors::default();
        }
        FormErrors {
            location: (!self.location.is_resolved()).then_some(LOCATION_REQUIRED),
            start_date: self.start_date.is_none().then_some(DATE_REQUIRED),
        }
    }

    /// Submit the form
    ///
    /// # Errors
    ///
    /// Returns the field messages when the location has no coordinates or
    /// no start date is set; nothing else happens in that case.
    pub fn submit(&mut self) -> Result<ForecastRequest, FormErrors> {
        self.submitted = true;
        match (self.location.coordinates, self.start_date) {
            (Some(coordinates), Some(start_date)) => Ok(ForecastRequest::new(
                coordinates,
                self.location.display_text.clone(),
                start_date,
                self.days,
            )),
            _ => Err(self.errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{GeoLocation, LocationSuggestion};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn picked() -> LocationSelection {
        LocationSelection::from_suggestion(&LocationSuggestion {
            label: "Mannheim, Baden-Württemberg, DE".into(),
            coordinates: GeoLocation::new(49.4875, 8.466).unwrap(),
        })
    }

    #[test]
    fn no_errors_before_submit() {
        let form = ForecastForm::new();
        assert!(!form.errors().any());
    }

    #[test]
    fn typed_text_without_selection_is_required_error() {
        let mut form = ForecastForm::new();
        form.set_location(LocationSelection::typed("Mannheim"));
        form.set_start_date(today(), today()).unwrap();

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.location, Some(LOCATION_REQUIRED));
        assert_eq!(errors.start_date, None);
        assert!(form.location().coordinates.is_none());
        assert_eq!(form.location().display_text, "Mannheim");
    }

    #[test]
    fn missing_date_is_required_error() {
        let mut form = ForecastForm::new();
        form.set_location(picked());
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.start_date, Some(DATE_REQUIRED));
        assert_eq!(errors.location, None);
    }

    #[test]
    fn complete_form_builds_request() {
        let mut form = ForecastForm::new();
        form.set_location(picked());
        form.set_start_date(today(), today()).unwrap();
        form.set_days(3);

        let request = form.submit().unwrap();
        assert_eq!(request.location_text, "Mannheim, Baden-Württemberg, DE");
        assert_eq!(request.days.value(), 3);
        assert_eq!(request.end_date(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert!(!form.errors().any());
    }

    #[test]
    fn start_date_bounds() {
        let mut form = ForecastForm::new();
        let yesterday = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let too_far = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert!(form.set_start_date(yesterday, today()).is_err());
        assert!(form.set_start_date(too_far, today()).is_err());
        assert!(form.set_start_date(last, today()).is_ok());
        assert_eq!(form.start_date(), Some(last));
    }

    #[test]
    fn days_are_clamped() {
        let mut form = ForecastForm::new();
        assert_eq!(form.days().value(), 1);
        form.set_days(0);
        assert_eq!(form.days().value(), 1);
        form.set_days(12);
        assert_eq!(form.days().value(), 5);
    }
}
