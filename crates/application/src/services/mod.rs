//! Application services - Report generation, filtering and location lookup

mod filter_controller;
mod forecast_form;
mod location_resolver;
mod report_builder;
mod report_session;
mod report_style;

pub use filter_controller::{
    FilterController, cloud_cover_filter, condition_criterion, condition_operation,
};
pub use forecast_form::{
    DATE_REQUIRED, FormErrors, ForecastForm, LOCATION_REQUIRED, MAX_START_OFFSET_DAYS,
};
pub use location_resolver::{
    LOADING_MESSAGE, LocationResolver, NO_MATCH_MESSAGE, ResolverConfig, ResolverState,
};
pub use report_builder::{GeneratedReport, ReportBuilder, build_report_batch, report_subtitle};
pub use report_session::{ReportSession, location_message};
pub use report_style::{ReportLayout, ReportStyle};
