//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    /// Coordinates outside the valid range
    #[error(transparent)]
    InvalidCoordinates(#[from] crate::value_objects::InvalidCoordinates),

    /// Day count outside the supported window
    #[error(transparent)]
    InvalidForecastDays(#[from] crate::value_objects::InvalidForecastDays),

    /// Malformed cloud cover range
    #[error(transparent)]
    InvalidCloudCoverRange(#[from] crate::value_objects::InvalidCloudCoverRange),
}
