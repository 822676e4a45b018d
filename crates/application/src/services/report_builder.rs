//! Report builder
//!
//! Fetches forecast days and lays them out as a styled table in the
//! active worksheet. Each generation wipes the sheet and rebuilds the
//! table from scratch in a single host batch.

use std::{fmt, sync::Arc};

use domain::{
    ColumnKey, ConditionOptions, DayRecord, ForecastRequest, formatting::format_date_display,
};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{ForecastPort, HostBatch, HostOperation, RangeRef, SpreadsheetHost},
    services::report_style::{ReportLayout, ReportStyle},
};

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    /// Number of data rows written
    pub row_count: usize,
    /// Condition options, only collected on an initial generation
    pub condition_options: Option<ConditionOptions>,
}

/// Subtitle shown under the report title
#[must_use]
pub fn report_subtitle(request: &ForecastRequest) -> String {
    format!(
        "Weather Forecast Report from {} to {}",
        format_date_display(request.start_date),
        format_date_display(request.end_date())
    )
}

/// Queue every host operation that renders `days` as the report table
///
/// When `options` is given, each day's conditions are folded into it.
#[must_use]
pub fn build_report_batch(
    days: &[DayRecord],
    title: &str,
    subtitle: &str,
    layout: &ReportLayout,
    style: &ReportStyle,
    mut options: Option<&mut ConditionOptions>,
) -> HostBatch {
    let table = layout.table_name.clone();
    let mut batch = HostBatch::new();

    batch.push(HostOperation::ClearSheet);
    batch.push(HostOperation::AddTable {
        name: table.clone(),
        anchor: layout.table_anchor,
        column_count: u16::try_from(ColumnKey::ALL.len()).unwrap_or(u16::MAX),
    });
    batch.push(HostOperation::SetHeaderValues {
        table: table.clone(),
        values: ColumnKey::header_labels(),
    });
    batch.push(HostOperation::FormatRange {
        range: RangeRef::TableHeader(table.clone()),
        format: style.header.clone(),
    });

    let mut rows = Vec::with_capacity(days.len());
    for day in days {
        if let (Some(options), Some(conditions)) = (options.as_deref_mut(), &day.conditions) {
            options.absorb(conditions);
        }
        rows.push(ColumnKey::row_for(day));
    }
    if !rows.is_empty() {
        batch.push(HostOperation::AppendRows {
            table: table.clone(),
            rows,
        });
    }

    batch.push(HostOperation::FormatRange {
        range: RangeRef::TableBody(table.clone()),
        format: style.body.clone(),
    });

    batch.push(HostOperation::SetCellValue {
        cell: layout.title_cell,
        value: title.into(),
    });
    batch.push(HostOperation::FormatRange {
        range: RangeRef::Cell(layout.title_cell),
        format: style.title.clone(),
    });
    batch.push(HostOperation::SetCellValue {
        cell: layout.subtitle_cell,
        value: subtitle.into(),
    });
    batch.push(HostOperation::FormatRange {
        range: RangeRef::Cell(layout.subtitle_cell),
        format: style.subtitle.clone(),
    });

    batch.push(HostOperation::SetTableStyle {
        table,
        style: style.table_style.clone(),
    });

    batch
}

/// Service that fetches forecasts and writes the report table
pub struct ReportBuilder {
    forecast: Arc<dyn ForecastPort>,
    host: Arc<dyn SpreadsheetHost>,
    layout: ReportLayout,
    style: ReportStyle,
}

impl fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("table", &self.layout.table_name)
            .field("atomic_host", &self.host.is_atomic())
            .finish_non_exhaustive()
    }
}

impl ReportBuilder {
    /// Create a builder with the default layout and style
    #[must_use]
    pub fn new(forecast: Arc<dyn ForecastPort>, host: Arc<dyn SpreadsheetHost>) -> Self {
        Self {
            forecast,
            host,
            layout: ReportLayout::default(),
            style: ReportStyle::default(),
        }
    }

    /// Use a custom style
    #[must_use]
    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    /// Use a custom layout
    #[must_use]
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Layout in use
    #[must_use]
    pub const fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Fetch the forecast for `request` and rebuild the report table
    ///
    /// `title` goes into the title cell. On an initial generation the
    /// condition options are collected from the fetched days.
    ///
    /// # Errors
    ///
    /// Returns the forecast fetch error or the host's batch error. The
    /// worksheet is left as the host left it.
    #[instrument(skip(self, request), fields(location = %request.location_text, days = %request.days))]
    pub async fn generate(
        &self,
        request: &ForecastRequest,
        title: &str,
        initial_run: bool,
    ) -> Result<GeneratedReport, ApplicationError> {
        let days = self.forecast.fetch_days(request).await?;
        debug!(count = days.len(), "Fetched forecast days");

        let mut options = initial_run.then(ConditionOptions::new);
        let batch = build_report_batch(
            &days,
            title,
            &report_subtitle(request),
            &self.layout,
            &self.style,
            options.as_mut(),
        );

        debug!(operations = batch.len(), "Synchronizing report batch");
        self.host.sync(batch).await?;

        info!(rows = days.len(), "Forecast report written");
        Ok(GeneratedReport {
            row_count: days.len(),
            condition_options: options,
        })
    }
}
