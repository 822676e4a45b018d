//! Cloud cover range value object
//!
//! A closed percentage interval used to filter the report's cloud cover
//! column. The slider that produces it moves in steps of ten.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::CloudCoverRange;
//!
//! let range = CloudCoverRange::new(20, 80).expect("valid range");
//! assert_eq!(range.low(), 20);
//! assert_eq!(range.high(), 80);
//!
//! assert!(CloudCoverRange::new(80, 20).is_err());
//! assert_eq!(CloudCoverRange::default(), CloudCoverRange::FULL);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a cloud cover range is malformed
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidCloudCoverRange {
    /// A bound exceeds 100%
    #[error("invalid cloud cover bound: {0}% is out of range (must be 0-100)")]
    OutOfRange(u8),

    /// Lower bound is above the upper bound
    #[error("invalid cloud cover range: {low}% is above {high}%")]
    Inverted { low: u8, high: u8 },
}

/// Inclusive cloud cover percentage range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CloudCoverRange {
    low: u8,
    high: u8,
}

impl CloudCoverRange {
    /// Maximum valid percentage
    pub const MAX: u8 = 100;

    /// Granularity of the range slider
    pub const STEP: u8 = 10;

    /// The whole 0-100% interval
    pub const FULL: Self = Self {
        low: 0,
        high: Self::MAX,
    };

    /// Create a validated range
    ///
    /// # Errors
    ///
    /// Returns `InvalidCloudCoverRange` if a bound exceeds 100 or `low > high`.
    pub const fn new(low: u8, high: u8) -> Result<Self, InvalidCloudCoverRange> {
        if low > Self::MAX {
            return Err(InvalidCloudCoverRange::OutOfRange(low));
        }
        if high > Self::MAX {
            return Err(InvalidCloudCoverRange::OutOfRange(high));
        }
        if low > high {
            return Err(InvalidCloudCoverRange::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// Create a range with both bounds snapped to the nearest slider step
    ///
    /// # Errors
    ///
    /// Same as [`CloudCoverRange::new`], checked after snapping.
    pub fn snapped(low: u8, high: u8) -> Result<Self, InvalidCloudCoverRange> {
        Self::new(snap(low), snap(high))
    }

    /// Lower bound (inclusive)
    #[must_use]
    pub const fn low(self) -> u8 {
        self.low
    }

    /// Upper bound (inclusive)
    #[must_use]
    pub const fn high(self) -> u8 {
        self.high
    }

    /// Check whether this is the unfiltered 0-100% interval
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.low == 0 && self.high == Self::MAX
    }

    /// Check whether a percentage lies inside the range
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= f64::from(self.low) && value <= f64::from(self.high)
    }
}

fn snap(value: u8) -> u8 {
    if value > CloudCoverRange::MAX {
        return value;
    }
    let step = CloudCoverRange::STEP;
    ((value + step / 2) / step) * step
}

impl Default for CloudCoverRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for CloudCoverRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%..{}%", self.low, self.high)
    }
}

impl std::str::FromStr for CloudCoverRange {
    type Err = String;

    /// Parse `LOW..HIGH` or `LOW-HIGH`, with optional `%` suffixes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once("..")
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("Invalid cloud cover range: {s}. Use LOW..HIGH"))?;

        let parse = |part: &str| {
            part.trim()
                .trim_end_matches('%')
                .parse::<u8>()
                .map_err(|e| format!("Invalid cloud cover bound '{part}': {e}"))
        };

        Self::new(parse(low)?, parse(high)?).map_err(|e| e.to_string())
    }
}

#[derive(Deserialize)]
struct RawRange {
    low: u8,
    high: u8,
}

/// Custom deserialization that validates both bounds
impl<'de> Deserialize<'de> for CloudCoverRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRange::deserialize(deserializer)?;
        Self::new(raw.low, raw.high).map_err(serde::de::Error::custom)
    }
}
