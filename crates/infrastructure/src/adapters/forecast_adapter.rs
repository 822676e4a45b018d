//! Forecast adapter - Implements `ForecastPort` using `integration_weather`

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ForecastPort;
use async_trait::async_trait;
use domain::{DayRecord, ForecastRequest};
use integration_weather::{ForecastClient, VisualCrossingClient, WeatherError};
use tracing::{debug, instrument};

use crate::config::ForecastAppConfig;

/// Adapter for the Visual Crossing timeline API
pub struct ForecastAdapter {
    client: Arc<dyn ForecastClient>,
}

impl std::fmt::Debug for ForecastAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastAdapter")
            .field("client", &"VisualCrossingClient")
            .finish()
    }
}

impl ForecastAdapter {
    /// Create an adapter from application configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the API key is missing, or `Internal` if
    /// the HTTP client fails to initialize.
    pub fn new(config: &ForecastAppConfig) -> Result<Self, ApplicationError> {
        let client = VisualCrossingClient::new(&config.to_forecast_config()).map_err(|e| match e {
            WeatherError::AuthenticationFailed(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Internal(other.to_string()),
        })?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn ForecastClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e)
            | WeatherError::AuthenticationFailed(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::InvalidDateRange { start, end } => {
                ApplicationError::InvalidOperation(format!("Invalid date range: {start} to {end}"))
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }
}

#[async_trait]
impl ForecastPort for ForecastAdapter {
    #[instrument(skip(self, request), fields(start = %request.start_date, days = %request.days))]
    async fn fetch_days(
        &self,
        request: &ForecastRequest,
    ) -> Result<Vec<DayRecord>, ApplicationError> {
        let result = self
            .client
            .fetch_timeline(&request.coordinates, request.start_date, request.end_date())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(days) => debug!(count = days.len(), "Retrieved forecast days"),
            Err(e) => debug!(error = %e, "Failed to get forecast"),
        }

        result
    }
}
