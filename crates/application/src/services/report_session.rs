//! Report session
//!
//! View-model state shared by the form and filter pages: the form, the
//! title captured at the last initial generation, the extracted condition
//! options and the current filter selections.
//!
//! Every host or network failure is caught here, logged together with the
//! host's debug payload, and reported to the caller as `false`.

use domain::{CloudCoverRange, ConditionOption, ConditionOptions};
use tracing::{error, info, warn};

use crate::{
    error::ApplicationError,
    services::{
        filter_controller::FilterController,
        forecast_form::{FormErrors, ForecastForm},
        location_resolver::ResolverState,
        report_builder::ReportBuilder,
    },
};

/// Message shown under the location box
///
/// A submit-time validation error wins over the resolver's status line.
#[must_use]
pub fn location_message(errors: &FormErrors, resolver: &ResolverState) -> Option<&'static str> {
    errors.location.or_else(|| resolver.message())
}

fn log_failure(action: &str, err: &ApplicationError) {
    error!(action, error = %err, "Report operation failed");
    if let Some(debug_info) = err.debug_info() {
        error!(action, %debug_info, "Debug info");
    }
}

/// Session state for one report
#[derive(Debug)]
pub struct ReportSession {
    builder: Option<ReportBuilder>,
    filters: FilterController,
    form: ForecastForm,
    title: Option<String>,
    condition_options: Option<ConditionOptions>,
    selected_condition: u32,
    cloud_cover: CloudCoverRange,
}

impl ReportSession {
    /// Create a session with an empty form and no report
    #[must_use]
    pub fn new(builder: ReportBuilder, filters: FilterController) -> Self {
        Self::with_parts(Some(builder), filters)
    }

    /// Resume filtering an existing report without a forecast source
    ///
    /// `generate_report` and `refresh_report` fail on such a session.
    #[must_use]
    pub fn resume(filters: FilterController, options: ConditionOptions) -> Self {
        Self::with_parts(None, filters).with_condition_options(options)
    }

    fn with_parts(builder: Option<ReportBuilder>, filters: FilterController) -> Self {
        Self {
            builder,
            filters,
            form: ForecastForm::new(),
            title: None,
            condition_options: None,
            selected_condition: ConditionOption::SHOW_ALL_KEY,
            cloud_cover: CloudCoverRange::FULL,
        }
    }

    fn forecast_source(&self) -> Result<&ReportBuilder, ApplicationError> {
        self.builder.as_ref().ok_or_else(|| {
            ApplicationError::Configuration("Session has no forecast source".to_string())
        })
    }

    /// Resume a session over an existing report whose options are known
    #[must_use]
    pub fn with_condition_options(mut self, options: ConditionOptions) -> Self {
        self.condition_options = Some(options);
        self
    }

    /// Resume a session over an existing report with a known title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The request form
    #[must_use]
    pub const fn form(&self) -> &ForecastForm {
        &self.form
    }

    /// Mutable access to the request form
    pub fn form_mut(&mut self) -> &mut ForecastForm {
        &mut self.form
    }

    /// Title written into the report
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Condition options from the last initial generation
    #[must_use]
    pub const fn condition_options(&self) -> Option<&ConditionOptions> {
        self.condition_options.as_ref()
    }

    /// Whether the filter page can be opened
    #[must_use]
    pub const fn filters_available(&self) -> bool {
        self.condition_options.is_some()
    }

    /// Key of the selected condition
    #[must_use]
    pub const fn selected_condition(&self) -> u32 {
        self.selected_condition
    }

    /// Cloud cover range currently selected
    #[must_use]
    pub const fn cloud_cover(&self) -> CloudCoverRange {
        self.cloud_cover
    }

    /// Submit the form and generate a fresh report
    ///
    /// Collects new condition options and captures the location text as the
    /// title. Returns `false` when validation failed (see
    /// [`ForecastForm::errors`]) or the fetch or host batch failed.
    pub async fn generate_report(&mut self) -> bool {
        let Ok(request) = self.form.submit() else {
            warn!(errors = ?self.form.errors(), "Form incomplete, nothing generated");
            return false;
        };

        let title = request.location_text.clone();
        let result = match self.forecast_source() {
            Ok(builder) => builder.generate(&request, &title, true).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(report) => {
                info!(rows = report.row_count, "Report generated");
                self.title = Some(title);
                self.condition_options = report.condition_options;
                true
            },
            Err(e) => {
                log_failure("generate_report", &e);
                false
            },
        }
    }

    /// Regenerate the report from the current form, keeping title and options
    pub async fn refresh_report(&mut self) -> bool {
        let Ok(request) = self.form.submit() else {
            warn!(errors = ?self.form.errors(), "Form incomplete, nothing regenerated");
            return false;
        };

        let title = self
            .title
            .clone()
            .unwrap_or_else(|| request.location_text.clone());
        let result = match self.forecast_source() {
            Ok(builder) => builder.generate(&request, &title, false).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(report) => {
                info!(rows = report.row_count, "Report regenerated");
                self.title = Some(title);
                true
            },
            Err(e) => {
                log_failure("refresh_report", &e);
                false
            },
        }
    }

    /// Select a condition by key and filter the report by it
    ///
    /// The selection is recorded even if the host rejects the filter.
    pub async fn filter_by_condition(&mut self, key: u32) -> bool {
        let option = match self
            .condition_options
            .as_ref()
            .and_then(|options| options.find_by_key(key))
        {
            Some(option) => option.clone(),
            None if key == ConditionOption::SHOW_ALL_KEY => ConditionOption::show_all(),
            None => {
                warn!(key, "Unknown condition option");
                return false;
            },
        };

        self.selected_condition = option.key;
        match self.filters.apply_condition_filter(&option).await {
            Ok(()) => true,
            Err(e) => {
                log_failure("filter_by_condition", &e);
                false
            },
        }
    }

    /// Move the cloud cover slider; nothing is sent to the host
    pub fn set_cloud_cover_range(&mut self, range: CloudCoverRange) {
        self.cloud_cover = range;
    }

    /// Apply the selected cloud cover range
    pub async fn filter_by_cloud_cover(&mut self) -> bool {
        match self.filters.apply_cloud_cover_filter(self.cloud_cover).await {
            Ok(()) => true,
            Err(e) => {
                log_failure("filter_by_cloud_cover", &e);
                false
            },
        }
    }

    /// Clear every filter, then reset the selections
    ///
    /// Selections stay as they are when the host fails.
    pub async fn reset_filters(&mut self) -> bool {
        match self.filters.clear_all_filters().await {
            Ok(()) => {
                self.selected_condition = ConditionOption::SHOW_ALL_KEY;
                self.cloud_cover = CloudCoverRange::FULL;
                true
            },
            Err(e) => {
                log_failure("reset_filters", &e);
                false
            },
        }
    }

    /// Leave the filter page, clearing the table's filters
    pub async fn leave_filters(&mut self) -> bool {
        match self.filters.clear_all_filters().await {
            Ok(()) => true,
            Err(e) => {
                log_failure("leave_filters", &e);
                false
            },
        }
    }
}
