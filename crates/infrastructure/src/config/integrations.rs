//! Integration configurations: forecast and geocoding services.

use integration_weather::{ForecastConfig, GeocodingConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Forecast Configuration
// ==============================

/// Visual Crossing forecast configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ForecastAppConfig {
    /// Timeline API base URL
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_forecast_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ForecastAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_forecast_base_url() -> String {
    ForecastConfig::default().base_url
}

const fn default_forecast_timeout() -> u64 {
    30
}

impl Default for ForecastAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            api_key: None,
            timeout_secs: default_forecast_timeout(),
        }
    }
}

impl ForecastAppConfig {
    /// Convert to `integration_weather`'s `ForecastConfig`
    #[must_use]
    pub fn to_forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key_str().map(str::to_string),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Get the API key as a string reference
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }
}

// ==============================
// Geocoding Configuration
// ==============================

/// OpenWeather geocoding configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Direct geocoding endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Maximum suggestions per lookup
    #[serde(default = "default_geocoding_limit")]
    pub limit: u8,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeocodingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("limit", &self.limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_geocoding_base_url() -> String {
    GeocodingConfig::default().base_url
}

const fn default_geocoding_limit() -> u8 {
    integration_weather::MAX_RESULTS
}

const fn default_geocoding_timeout() -> u64 {
    10
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
            limit: default_geocoding_limit(),
            timeout_secs: default_geocoding_timeout(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to `integration_weather`'s `GeocodingConfig`
    #[must_use]
    pub fn to_geocoding_config(&self) -> GeocodingConfig {
        GeocodingConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key_str().map(str::to_string),
            limit: self.limit,
            timeout_secs: self.timeout_secs,
        }
    }

    /// Get the API key as a string reference
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }
}
