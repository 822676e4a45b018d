//! Geocoding port
//!
//! Turns free-text place names into coordinate candidates.

use async_trait::async_trait;
use domain::LocationSuggestion;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Maximum number of candidates shown to the user
pub const MAX_SUGGESTIONS: u8 = 8;

/// Port for place-name lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Look up candidates for a query, at most `limit` of them
    ///
    /// An empty result is not an error at this level.
    async fn search(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<LocationSuggestion>, ApplicationError>;
}
