//! Visual Crossing timeline client
//!
//! HTTP client for the Visual Crossing Timeline Weather API
//! (<https://www.visualcrossing.com/weather-api>).

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{ColumnKey, DayRecord, GeoLocation, formatting::format_iso_date};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::TimelineResponse;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// API key missing or rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// End date before start date
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Forecast service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Timeline API base URL, ending in `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Visual Crossing API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/"
        .to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Forecast client trait for fetching day records
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch one record per day from `start` to `end`, both inclusive
    async fn fetch_timeline(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayRecord>, WeatherError>;
}

/// Visual Crossing HTTP client implementation
#[derive(Debug)]
pub struct VisualCrossingClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl VisualCrossingClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &ForecastConfig) -> Result<Self, WeatherError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            WeatherError::AuthenticationFailed("Visual Crossing API key is required".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
        })
    }

    /// Build the timeline URL without query parameters
    fn build_timeline_url(&self, location: &GeoLocation, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            location.path_segment(),
            format_iso_date(start),
            format_iso_date(end)
        )
    }
}

#[async_trait]
impl ForecastClient for VisualCrossingClient {
    #[instrument(skip(self, location), fields(location = %location.path_segment()))]
    async fn fetch_timeline(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayRecord>, WeatherError> {
        if end < start {
            return Err(WeatherError::InvalidDateRange { start, end });
        }

        let url = self.build_timeline_url(location, start, end);
        let elements = ColumnKey::elements_param();
        debug!(url = %url, "Fetching forecast timeline");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("elements", elements.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    WeatherError::ConnectionFailed(e.to_string())
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WeatherError::AuthenticationFailed(
                "Invalid Visual Crossing API key".to_string(),
            ));
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::RequestFailed(format!("HTTP {status}: {body}")));
        }

        let timeline: TimelineResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        debug!(
            days = timeline.days.len(),
            resolved = timeline.resolved_address.as_deref().unwrap_or_default(),
            "Forecast timeline received"
        );
        Ok(timeline.days)
    }
}
