//! Logging initialization
//!
//! Installs a global `tracing` subscriber writing to stderr, either as
//! human-readable lines or as JSON. `RUST_LOG` wins over the configured
//! filter when set.

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingAppConfig};

/// Errors from logging setup
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A global subscriber is already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Filter directive for a `-v` count
///
/// 0 → warn, 1 → info, 2 → debug, 3+ → trace.
#[must_use]
pub const fn log_filter_from_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Pick the effective filter directive
///
/// An explicit configured filter beats the verbosity flag.
#[must_use]
pub fn effective_filter(config: &LoggingAppConfig, verbosity: u8) -> String {
    config
        .filter
        .clone()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| log_filter_from_verbosity(verbosity).to_string())
}

fn build_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns `TelemetryError` if the filter is invalid or a subscriber was
/// already installed.
pub fn init_logging(config: &LoggingAppConfig, verbosity: u8) -> Result<(), TelemetryError> {
    let directive = effective_filter(config, verbosity);
    let filter = build_filter(&directive)?;

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(filter = %directive, format = ?config.format, "Logging initialized");
    Ok(())
}
