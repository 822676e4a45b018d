//! Domain layer for the forecast report
//!
//! Contains the report's entities, value objects, column metadata and the
//! pure formatting rules applied to forecast data.

pub mod columns;
pub mod entities;
pub mod errors;
pub mod formatting;
pub mod value_objects;

pub use columns::{ColumnKey, FormattingRule};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
