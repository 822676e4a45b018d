//! Forecast length value object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a day count is outside the supported window
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid number of days: {0} (must be 1-5)")]
pub struct InvalidForecastDays(pub u8);

/// Number of days a report covers (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ForecastDays(u8);

impl ForecastDays {
    /// Smallest report
    pub const MIN: u8 = 1;
    /// Largest report
    pub const MAX: u8 = 5;

    /// Create a validated day count
    ///
    /// # Errors
    ///
    /// Returns `InvalidForecastDays` if the value is not in 1..=5.
    pub const fn new(value: u8) -> Result<Self, InvalidForecastDays> {
        if value < Self::MIN || value > Self::MAX {
            Err(InvalidForecastDays(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create a day count, clamping into 1..=5
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Get the raw count
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for ForecastDays {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = InvalidForecastDays;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for ForecastDays {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
