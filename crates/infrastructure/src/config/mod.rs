//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `integrations`: forecast and geocoding services
//!
//! Values are layered: built-in defaults, then an optional `config.toml`
//! (or an explicit file), then `FORECAST_REPORT_*` environment variables.
//! Nested keys use a double underscore, e.g.
//! `FORECAST_REPORT_FORECAST__API_KEY`.

mod integrations;

use std::{path::Path, path::PathBuf, time::Duration};

use application::services::ResolverConfig;
use application::ports::MAX_SUGGESTIONS;
use serde::{Deserialize, Serialize};

pub use integrations::{ForecastAppConfig, GeocodingAppConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FORECAST_REPORT";

/// Default document path
pub const DEFAULT_DOCUMENT: &str = "forecast-report.json";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingAppConfig {
    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Explicit filter directive (overrides `-v` when set)
    #[serde(default)]
    pub filter: Option<String>,
}

/// Location resolver tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverAppConfig {
    /// Quiet period before a geocoding lookup, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    1000
}

impl Default for ResolverAppConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ResolverAppConfig {
    /// Resolver settings, capped by the geocoding limit
    #[must_use]
    pub fn to_resolver_config(&self, geocoding: &GeocodingAppConfig) -> ResolverConfig {
        ResolverConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            limit: geocoding.limit.min(MAX_SUGGESTIONS),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forecast service
    #[serde(default)]
    pub forecast: ForecastAppConfig,

    /// Geocoding service
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Location resolver
    #[serde(default)]
    pub resolver: ResolverAppConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingAppConfig,

    /// Path of the persisted workbook document
    #[serde(default = "default_document")]
    pub document: PathBuf,
}

fn default_document() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT)
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `config.toml`
    ///
    /// An explicit path must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is missing or cannot be parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .set_default("document", DEFAULT_DOCUMENT)?
            .set_default("resolver.debounce_ms", default_debounce_ms())?
            .add_source(file)
            // e.g. FORECAST_REPORT_GEOCODING__API_KEY
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Keys that still need to be supplied
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.forecast.api_key_str().is_none_or(str::is_empty) {
            missing.push("forecast.api_key");
        }
        if self.geocoding.api_key_str().is_none_or(str::is_empty) {
            missing.push("geocoding.api_key");
        }
        missing
    }
}
