//! Forecast service port
//!
//! Defines the interface for fetching forecast days for a date range.

use async_trait::async_trait;
use domain::{DayRecord, ForecastRequest};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for forecast data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch one record per day from `start_date` to `end_date`
    ///
    /// Records carry every attribute in [`domain::ColumnKey::ALL`] the
    /// provider knows about.
    async fn fetch_days(&self, request: &ForecastRequest)
    -> Result<Vec<DayRecord>, ApplicationError>;
}
