//! Value objects - Immutable, validated domain primitives

pub mod cloud_cover_range;
pub mod forecast_days;
pub mod geo_location;

pub use cloud_cover_range::{CloudCoverRange, InvalidCloudCoverRange};
pub use forecast_days::{ForecastDays, InvalidForecastDays};
pub use geo_location::{GeoLocation, InvalidCoordinates};
