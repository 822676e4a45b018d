//! Weather integration
//!
//! Clients for the Visual Crossing timeline API (daily forecasts) and the
//! OpenWeather direct geocoding API (place name to coordinates).

pub mod client;
pub mod geocoding;
mod models;

pub use client::{ForecastClient, ForecastConfig, VisualCrossingClient, WeatherError};
pub use geocoding::{
    GeocodingClient, GeocodingConfig, GeocodingError, MAX_RESULTS, OpenWeatherGeocoder,
};
pub use models::{GeocodeResult, TimelineResponse};
