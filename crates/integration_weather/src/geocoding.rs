//! OpenWeather direct geocoding client
//!
//! Resolves free-text place names to coordinates via
//! <https://openweathermap.org/api/geocoding-api>.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::GeocodeResult;

/// Upper bound accepted by the direct geocoding endpoint
pub const MAX_RESULTS: u8 = 8;

/// Geocoding client errors
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the geocoding service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// API key missing or rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Empty query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Direct geocoding endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeather API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Maximum results per lookup (1-8)
    #[serde(default = "default_limit")]
    pub limit: u8,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://api.openweathermap.org/geo/1.0/direct".to_string()
}

const fn default_limit() -> u8 {
    MAX_RESULTS
}

const fn default_timeout() -> u64 {
    10
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            limit: default_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Geocoding client trait
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Look up places matching `query`, at most `limit` of them
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodeResult>, GeocodingError>;
}

/// OpenWeather geocoding HTTP client
#[derive(Debug)]
pub struct OpenWeatherGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
    limit: u8,
}

impl OpenWeatherGeocoder {
    /// Create a new geocoder
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            GeocodingError::AuthenticationFailed("OpenWeather API key is required".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            limit: config.limit.clamp(1, MAX_RESULTS),
        })
    }
}

#[async_trait]
impl GeocodingClient for OpenWeatherGeocoder {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodeResult>, GeocodingError> {
        if query.trim().is_empty() {
            return Err(GeocodingError::InvalidQuery(
                "Location query cannot be empty".to_string(),
            ));
        }

        let limit = limit.clamp(1, self.limit).to_string();
        debug!(url = %self.base_url, "Sending geocoding request");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GeocodingError::ConnectionFailed(e.to_string())
                } else {
                    GeocodingError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GeocodingError::AuthenticationFailed(
                "Invalid OpenWeather API key".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let results: Vec<GeocodeResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        debug!(count = results.len(), "Geocoding results received");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeocodingConfig::default();
        assert_eq!(config.base_url, "http://api.openweathermap.org/geo/1.0/direct");
        assert_eq!(config.limit, 8);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = OpenWeatherGeocoder::new(&GeocodingConfig::default());
        assert!(matches!(result, Err(GeocodingError::AuthenticationFailed(_))));
    }

    #[test]
    fn test_limit_is_clamped() {
        let geocoder = OpenWeatherGeocoder::new(&GeocodingConfig {
            api_key: Some("k".into()),
            limit: 50,
            ..GeocodingConfig::default()
        })
        .unwrap();
        assert_eq!(geocoder.limit, MAX_RESULTS);
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let geocoder = OpenWeatherGeocoder::new(&GeocodingConfig {
            api_key: Some("k".into()),
            ..GeocodingConfig::default()
        })
        .unwrap();
        let result = geocoder.search("   ", 8).await;
        assert!(matches!(result, Err(GeocodingError::InvalidQuery(_))));
    }
}
