//! Workbook-backed spreadsheet host
//!
//! Applies host batches to an in-memory [`Workbook`]. A batch runs against a
//! scratch copy that replaces the document only when every operation
//! succeeded, so a failed batch leaves the document untouched.

use std::path::{Path, PathBuf};

use application::ports::{
    HostBatch, HostError, HostErrorCode, HostOperation, RangeRef, SpreadsheetHost,
};
use async_trait::async_trait;
use domain::{ColumnKey, ConditionOptions};
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::{Cell, CompiledFilter, DocumentError, Table, Workbook, store_value};

/// In-memory spreadsheet host with optional JSON persistence
#[derive(Debug, Default)]
pub struct WorkbookHost {
    document: RwLock<Workbook>,
    path: Option<PathBuf>,
}

impl WorkbookHost {
    /// Host over an empty, unsaved document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host over an existing document
    #[must_use]
    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            document: RwLock::new(workbook),
            path: None,
        }
    }

    /// Open the document stored at `path`, or start empty if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` when the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        let workbook = Workbook::load_or_default(&path)?;
        debug!(path = %path.display(), has_table = workbook.table.is_some(), "Opened host document");
        Ok(Self {
            document: RwLock::new(workbook),
            path: Some(path),
        })
    }

    /// Location the document is saved to
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persist the document to its path; a no-op for unsaved hosts
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` on I/O failure.
    pub fn save(&self) -> Result<(), DocumentError> {
        match &self.path {
            Some(path) => self.document.read().save(path),
            None => Ok(()),
        }
    }

    /// Copy of the current document
    #[must_use]
    pub fn snapshot(&self) -> Workbook {
        self.document.read().clone()
    }

    /// Condition options re-derived from the report's Conditions column
    ///
    /// `None` when there is no report table.
    #[must_use]
    pub fn condition_options(&self, table: &str) -> Option<ConditionOptions> {
        let document = self.document.read();
        let table = document.table(table).ok()?;
        let values = table.column_values(ColumnKey::Conditions.label())?;
        Some(ConditionOptions::from_joined(values.filter_map(|v| v.as_text())))
    }
}

#[async_trait]
impl SpreadsheetHost for WorkbookHost {
    #[instrument(skip(self, batch), fields(operations = batch.len()))]
    async fn sync(&self, batch: HostBatch) -> Result<(), HostError> {
        let mut document = self.document.write();
        let mut scratch = document.clone();

        for (index, operation) in batch.into_operations().into_iter().enumerate() {
            if let Err(err) = apply(&mut scratch, operation) {
                warn!(index, error = %err, "Batch rejected, document unchanged");
                return Err(err);
            }
        }

        *document = scratch;
        debug!("Batch applied");
        Ok(())
    }

    fn is_atomic(&self) -> bool {
        true
    }
}

fn apply(doc: &mut Workbook, operation: HostOperation) -> Result<(), HostError> {
    match operation {
        HostOperation::ClearSheet => {
            doc.cells.clear();
            doc.table = None;
        },
        HostOperation::AddTable {
            name,
            anchor,
            column_count,
        } => {
            if let Some(existing) = &doc.table {
                return Err(HostError::new(
                    HostErrorCode::InvalidOperation,
                    format!("Worksheet already contains table '{}'", existing.name),
                ));
            }
            if column_count == 0 {
                return Err(HostError::new(
                    HostErrorCode::InvalidArgument,
                    "A table needs at least one column",
                ));
            }
            doc.table = Some(Table::new(name, anchor, column_count));
        },
        HostOperation::SetHeaderValues { table, values } => {
            let table = doc.table_mut(&table)?;
            if values.len() != table.columns.len() {
                return Err(width_mismatch(table.columns.len(), values.len()));
            }
            table.columns = values;
        },
        HostOperation::AppendRows { table, rows } => {
            let table = doc.table_mut(&table)?;
            let width = table.columns.len();
            if let Some(row) = rows.iter().find(|row| row.len() != width) {
                return Err(width_mismatch(width, row.len()));
            }
            table
                .rows
                .extend(rows.into_iter().map(|row| row.into_iter().map(store_value).collect()));
        },
        HostOperation::SetCellValue { cell, value } => {
            doc.cells.entry(cell).or_insert_with(Cell::default).value = store_value(value);
        },
        HostOperation::FormatRange { range, format } => match range {
            RangeRef::Cell(address) => {
                doc.cells
                    .entry(address)
                    .or_insert_with(Cell::default)
                    .format
                    .merge(&format);
            },
            RangeRef::TableHeader(table) => doc.table_mut(&table)?.header_format.merge(&format),
            RangeRef::TableBody(table) => doc.table_mut(&table)?.body_format.merge(&format),
        },
        HostOperation::SetTableStyle { table, style } => {
            doc.table_mut(&table)?.style = Some(style);
        },
        HostOperation::ApplyColumnFilter {
            table,
            column,
            filter,
        } => {
            let table = doc.table_mut(&table)?;
            ensure_column(table, &column)?;
            CompiledFilter::compile(&filter)?;
            table.filters.insert(column, filter);
        },
        HostOperation::ClearColumnFilter { table, column } => {
            let table = doc.table_mut(&table)?;
            ensure_column(table, &column)?;
            table.filters.remove(&column);
        },
        HostOperation::ClearTableFilters { table } => {
            doc.table_mut(&table)?.filters.clear();
        },
    }
    Ok(())
}

fn ensure_column(table: &Table, column: &str) -> Result<(), HostError> {
    table.column_index(column).map(|_| ()).ok_or_else(|| {
        HostError::not_found(format!("Column '{column}' in table '{}'", table.name))
            .with_debug_info(serde_json::json!({
                "code": "ItemNotFound",
                "errorLocation": "TableColumnCollection.getItem",
                "statement": format!("var column = columns.getItem(\"{column}\");"),
            }))
    })
}

fn width_mismatch(expected: usize, actual: usize) -> HostError {
    HostError::new(
        HostErrorCode::InvalidArgument,
        format!("Row has {actual} values but the table has {expected} columns"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::ports::{CellAddress, CustomFilter, RangeFormat};
    use domain::CellValue;

    const TABLE: &str = "ForecastReport";

    fn create_table_batch() -> HostBatch {
        let mut batch = HostBatch::new();
        batch
            .push(HostOperation::ClearSheet)
            .push(HostOperation::AddTable {
                name: TABLE.into(),
                anchor: CellAddress::new(3, 0),
                column_count: 2,
            })
            .push(HostOperation::SetHeaderValues {
                table: TABLE.into(),
                values: vec!["Conditions".into(), "Cloud Cover (%)".into()],
            })
            .push(HostOperation::AppendRows {
                table: TABLE.into(),
                rows: vec![
                    vec![CellValue::from("Rain, Overcast"), CellValue::Number(90.0)],
                    vec![CellValue::from("'Clear"), CellValue::Number(10.0)],
                ],
            })
            .push(HostOperation::SetCellValue {
                cell: CellAddress::new(0, 0),
                value: CellValue::from("Mannheim"),
            })
            .push(HostOperation::FormatRange {
                range: RangeRef::Cell(CellAddress::new(0, 0)),
                format: RangeFormat::new().bold(true).font_size(16.0),
            });
        batch
    }

    fn single(operation: HostOperation) -> HostBatch {
        let mut batch = HostBatch::new();
        batch.push(operation);
        batch
    }

    #[tokio::test]
    async fn builds_table_and_cells() {
        let host = WorkbookHost::new();
        host.sync(create_table_batch()).await.unwrap();

        let doc = host.snapshot();
        let table = doc.table(TABLE).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], CellValue::from("Clear"));
        assert_eq!(
            doc.cell_value(CellAddress::new(0, 0)),
            Some(&CellValue::from("Mannheim"))
        );
        assert_eq!(doc.cells[&CellAddress::new(0, 0)].format.font_size, Some(16.0));
    }

    #[tokio::test]
    async fn failed_batch_leaves_document_untouched() {
        let host = WorkbookHost::new();
        host.sync(create_table_batch()).await.unwrap();
        let before = host.snapshot();

        let mut batch = HostBatch::new();
        batch
            .push(HostOperation::ClearSheet)
            .push(HostOperation::SetTableStyle {
                table: TABLE.into(),
                style: "TableStyleMedium25".into(),
            });
        let err = host.sync(batch).await.unwrap_err();

        assert_eq!(err.code, HostErrorCode::ItemNotFound);
        assert!(err.debug_info.is_some());
        assert_eq!(host.snapshot(), before);
        assert!(host.is_atomic());
    }

    #[tokio::test]
    async fn second_table_is_rejected() {
        let host = WorkbookHost::new();
        host.sync(create_table_batch()).await.unwrap();
        let err = host
            .sync(single(HostOperation::AddTable {
                name: "Other".into(),
                anchor: CellAddress::new(0, 5),
                column_count: 1,
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, HostErrorCode::InvalidOperation);
    }

    #[tokio::test]
    async fn ragged_rows_are_rejected() {
        let host = WorkbookHost::new();
        host.sync(create_table_batch()).await.unwrap();
        let err = host
            .sync(single(HostOperation::AppendRows {
                table: TABLE.into(),
                rows: vec![vec![CellValue::from("Rain")]],
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, HostErrorCode::InvalidArgument);
        assert_eq!(host.snapshot().table(TABLE).unwrap().rows.len(), 2);
    }

    #[tokio::test]
    async fn filters_replace_per_column_and_clear() {
        let host = WorkbookHost::new();
        host.sync(create_table_batch()).await.unwrap();

        for criterion in ["=*Rain*", "=*Clear*"] {
            host.sync(single(HostOperation::ApplyColumnFilter {
                table: TABLE.into(),
                column: "Conditions".into(),
                filter: CustomFilter::single(criterion),
            }))
            .await
            .unwrap();
        }
        let doc = host.snapshot();
        let table = doc.table(TABLE).unwrap();
        assert_eq!(table.filters.len(), 1);
        assert_eq!(table.row_visibility().unwrap(), vec![false, true]);

        host.sync(single(HostOperation::ClearColumnFilter {
            table: TABLE.into(),
            column: "Conditions".into(),
        }))
        .await
        .unwrap();
        assert!(host.snapshot().table(TABLE).unwrap().filters.is_empty());
    }

    #[tokio::test]
    async fn unknown_column_or_bad_criterion_rejected() {
        let host = WorkbookHost::new();
        host.sync(create_table_batch()).await.unwrap();

        let err = host
            .sync(single(HostOperation::ApplyColumnFilter {
                table: TABLE.into(),
                column: "Humidity (%)".into(),
                filter: CustomFilter::single("=*x*"),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, HostErrorCode::ItemNotFound);
        let debug_info = err.debug_info.expect("missing column carries debug info");
        assert_eq!(debug_info["errorLocation"], "TableColumnCollection.getItem");

        let err = host
            .sync(single(HostOperation::ApplyColumnFilter {
                table: TABLE.into(),
                column: "Cloud Cover (%)".into(),
                filter: CustomFilter::single("<=lots"),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, HostErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn clear_filters_without_table_fails() {
        let host = WorkbookHost::new();
        let err = host
            .sync(single(HostOperation::ClearTableFilters {
                table: TABLE.into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, HostErrorCode::ItemNotFound);
    }

    #[tokio::test]
    async fn options_rederived_from_document() {
        let host = WorkbookHost::new();
        assert!(host.condition_options(TABLE).is_none());
        host.sync(create_table_batch()).await.unwrap();

        let options = host.condition_options(TABLE).unwrap();
        let texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Show All", "Rain", "Overcast", "Clear"]);
    }

    #[tokio::test]
    async fn open_save_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast-report.json");

        let host = WorkbookHost::open(&path).unwrap();
        host.sync(create_table_batch()).await.unwrap();
        host.save().unwrap();

        let reopened = WorkbookHost::open(&path).unwrap();
        assert_eq!(reopened.snapshot(), host.snapshot());
        assert_eq!(reopened.path(), Some(path.as_path()));
    }
}
