//! Application layer - Use cases and orchestration
//!
//! Contains the report, filter and location services plus the port
//! definitions they drive. Adapters in the infrastructure layer implement
//! the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
