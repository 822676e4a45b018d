//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: HTTP adapters for the
//! forecast and geocoding services, the JSON-backed workbook host, `.xlsx`
//! export, configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod export;
pub mod telemetry;
pub mod workbook;

pub use adapters::*;
pub use config::{AppConfig, ForecastAppConfig, GeocodingAppConfig, LogFormat, LoggingAppConfig};
pub use export::export_xlsx;
pub use telemetry::{TelemetryError, init_logging, log_filter_from_verbosity};
pub use workbook::{DocumentError, Workbook, WorkbookHost};
