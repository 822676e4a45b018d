//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::HostError;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Spreadsheet host rejected a batch
    #[error(transparent)]
    Host(#[from] HostError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Lookup returned nothing
    #[error("No matches found: {0}")]
    NoMatch(String),

    /// Operation not valid in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Extra diagnostic payload attached by the spreadsheet host, if any
    #[must_use]
    pub fn debug_info(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Host(err) => err.debug_info.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HostErrorCode;

    #[test]
    fn host_error_exposes_debug_info() {
        let err: ApplicationError = HostError::new(HostErrorCode::ItemNotFound, "missing")
            .with_debug_info(serde_json::json!({ "code": "ItemNotFound" }))
            .into();
        assert_eq!(
            err.debug_info(),
            Some(&serde_json::json!({ "code": "ItemNotFound" }))
        );
    }

    #[test]
    fn other_errors_have_no_debug_info() {
        assert!(ApplicationError::RateLimited.debug_info().is_none());
        assert!(ApplicationError::NoMatch("x".into()).debug_info().is_none());
    }

    #[test]
    fn messages() {
        assert_eq!(
            ApplicationError::ExternalService("timeout".into()).to_string(),
            "External service error: timeout"
        );
        assert_eq!(
            ApplicationError::NoMatch("Atlantis".into()).to_string(),
            "No matches found: Atlantis"
        );
    }
}
