//! Filter controller
//!
//! Applies and clears column filters on the report table. Each operation
//! is a one-operation host batch; the host keeps one filter per column, so
//! the condition and cloud cover filters never interfere.

use std::{fmt, sync::Arc};

use domain::{CloudCoverRange, ColumnKey, ConditionOption};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{CustomFilter, FilterOperator, HostBatch, HostOperation, SpreadsheetHost},
    services::report_style::ReportLayout,
};

/// Substring criterion matching any cell containing `condition`
#[must_use]
pub fn condition_criterion(condition: &str) -> String {
    format!("=*{condition}*")
}

/// Criteria keeping rows whose cloud cover lies inside `range`
#[must_use]
pub fn cloud_cover_filter(range: CloudCoverRange) -> CustomFilter {
    CustomFilter::combined(
        format!("<={}", range.high()),
        format!(">={}", range.low()),
        FilterOperator::And,
    )
}

/// Host operation for a condition selection
#[must_use]
pub fn condition_operation(table: &str, option: &ConditionOption) -> HostOperation {
    let column = ColumnKey::Conditions.label().to_string();
    if option.is_show_all() {
        HostOperation::ClearColumnFilter {
            table: table.to_string(),
            column,
        }
    } else {
        HostOperation::ApplyColumnFilter {
            table: table.to_string(),
            column,
            filter: CustomFilter::single(condition_criterion(&option.text)),
        }
    }
}

/// Service driving the report table's column filters
pub struct FilterController {
    host: Arc<dyn SpreadsheetHost>,
    table: String,
}

impl fmt::Debug for FilterController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterController")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl FilterController {
    /// Create a controller targeting the default report table
    #[must_use]
    pub fn new(host: Arc<dyn SpreadsheetHost>) -> Self {
        Self::for_layout(host, &ReportLayout::default())
    }

    /// Create a controller targeting the table of `layout`
    #[must_use]
    pub fn for_layout(host: Arc<dyn SpreadsheetHost>, layout: &ReportLayout) -> Self {
        Self {
            host,
            table: layout.table_name.clone(),
        }
    }

    /// Filter the conditions column by `option`, or clear it for "Show All"
    ///
    /// # Errors
    ///
    /// Returns the host error, e.g. when the report table does not exist.
    #[instrument(skip(self), fields(condition = %option.text, key = option.key))]
    pub async fn apply_condition_filter(
        &self,
        option: &ConditionOption,
    ) -> Result<(), ApplicationError> {
        let mut batch = HostBatch::new();
        batch.push(condition_operation(&self.table, option));
        self.host.sync(batch).await?;
        debug!("Condition filter applied");
        Ok(())
    }

    /// Keep only rows whose cloud cover lies inside `range`
    ///
    /// The full 0-100% range is still sent as an explicit criterion.
    ///
    /// # Errors
    ///
    /// Returns the host error, e.g. when the report table does not exist.
    #[instrument(skip(self), fields(range = %range))]
    pub async fn apply_cloud_cover_filter(
        &self,
        range: CloudCoverRange,
    ) -> Result<(), ApplicationError> {
        let mut batch = HostBatch::new();
        batch.push(HostOperation::ApplyColumnFilter {
            table: self.table.clone(),
            column: ColumnKey::CloudCover.label().to_string(),
            filter: cloud_cover_filter(range),
        });
        self.host.sync(batch).await?;
        debug!("Cloud cover filter applied");
        Ok(())
    }

    /// Remove every filter from the report table
    ///
    /// # Errors
    ///
    /// Returns the host error, e.g. when the report table does not exist.
    #[instrument(skip(self))]
    pub async fn clear_all_filters(&self) -> Result<(), ApplicationError> {
        let mut batch = HostBatch::new();
        batch.push(HostOperation::ClearTableFilters {
            table: self.table.clone(),
        });
        self.host.sync(batch).await?;
        debug!("Filters cleared");
        Ok(())
    }
}
