//! Domain entities

pub mod cell_value;
pub mod condition_option;
pub mod day_record;
pub mod forecast_request;
pub mod location;

pub use cell_value::CellValue;
pub use condition_option::{CONDITION_SEPARATOR, ConditionOption, ConditionOptions};
pub use day_record::{DayRecord, RawValue};
pub use forecast_request::ForecastRequest;
pub use location::{LocationSelection, LocationSuggestion};
