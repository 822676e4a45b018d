//! Value formatting rules for report cells
//!
//! Pure conversions applied to day records before they are written into
//! the spreadsheet.

use chrono::NaiveDate;

use crate::errors::DomainError;

/// Wire format of dates sent to and received from the forecast API
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Human display format, e.g. `5 January, 2024`
const DISPLAY_DATE_FORMAT: &str = "%-d %B, %Y";

/// Spreadsheet input prefix that forces a value to be stored as text
pub const TEXT_PREFIX: char = '\'';

/// Convert Fahrenheit to Celsius, rounded to one decimal
///
/// Halves round towards positive infinity.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    let celsius = (fahrenheit - 32.0) * 0.5556;
    (celsius * 10.0 + 0.5).floor() / 10.0
}

/// Format a date as `YYYY-MM-DD`
#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `DomainError::InvalidDateTime` if the string is not an ISO date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
        .map_err(|e| DomainError::InvalidDateTime(format!("{raw}: {e}")))
}

/// Format a date for display, e.g. `5 January, 2024`
#[must_use]
pub fn format_date_display(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Reformat an ISO date string for display
///
/// # Errors
///
/// Returns `DomainError::InvalidDateTime` if the input cannot be parsed.
pub fn format_iso_date_display(raw: &str) -> Result<String, DomainError> {
    parse_iso_date(raw).map(format_date_display)
}

/// Prefix a value so the spreadsheet keeps it as literal text
#[must_use]
pub fn force_text(value: &str) -> String {
    let mut text = String::with_capacity(value.len() + 1);
    text.push(TEXT_PREFIX);
    text.push_str(value);
    text
}
