//! Geocoding adapter - Implements `GeocodingPort` using `integration_weather`

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::LocationSuggestion;
use integration_weather::{GeocodingClient, GeocodingError, OpenWeatherGeocoder};
use tracing::{debug, instrument, warn};

use crate::config::GeocodingAppConfig;

/// Adapter for OpenWeather direct geocoding
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"OpenWeatherGeocoder")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter from application configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the API key is missing, or `Internal` if
    /// the HTTP client fails to initialize.
    pub fn new(config: &GeocodingAppConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenWeatherGeocoder::new(&config.to_geocoding_config()).map_err(|e| match e {
                GeocodingError::AuthenticationFailed(msg) => ApplicationError::Configuration(msg),
                other => ApplicationError::Internal(other.to_string()),
            })?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ConnectionFailed(e)
            | GeocodingError::RequestFailed(e)
            | GeocodingError::AuthenticationFailed(e) => ApplicationError::ExternalService(e),
            GeocodingError::ParseError(e) => ApplicationError::Internal(e),
            GeocodingError::InvalidQuery(e) => ApplicationError::InvalidOperation(e),
            GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<LocationSuggestion>, ApplicationError> {
        let results = self
            .client
            .search(query, limit)
            .await
            .map_err(Self::map_error)?;

        let total = results.len();
        let suggestions: Vec<LocationSuggestion> = results
            .into_iter()
            .filter_map(|result| {
                let label = result.label();
                let suggestion = result.into_suggestion();
                if suggestion.is_none() {
                    warn!(%label, "Dropping result with out-of-range coordinates");
                }
                suggestion
            })
            .take(usize::from(limit))
            .collect();

        debug!(total, kept = suggestions.len(), "Geocoding results mapped");
        Ok(suggestions)
    }
}
