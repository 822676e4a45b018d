//! In-memory workbook
//!
//! A single-worksheet document standing in for the spreadsheet host. It
//! holds free cells (title rows) and at most one table, keeps per-column
//! filters, and persists as JSON between CLI sessions.

mod criteria;
mod host;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use application::ports::{CellAddress, CustomFilter, HostError, HostErrorCode, RangeFormat};
use domain::{CellValue, formatting::TEXT_PREFIX};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use criteria::{CompiledFilter, Criterion, wildcard_match};
pub use host::WorkbookHost;

/// Errors reading or writing the host document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON for this format
    #[error("Malformed document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Stored filter cannot be evaluated
    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] HostError),

    /// Spreadsheet export failed
    #[error("Export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

/// A free cell with its format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Stored value
    pub value: CellValue,
    /// Accumulated format
    #[serde(default)]
    pub format: RangeFormat,
}

/// The single report table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Top-left header cell
    pub anchor: CellAddress,
    /// Header labels, one per column
    pub columns: Vec<String>,
    /// Data rows
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
    /// Header row format
    #[serde(default)]
    pub header_format: RangeFormat,
    /// Data rows format
    #[serde(default)]
    pub body_format: RangeFormat,
    /// Named table style
    #[serde(default)]
    pub style: Option<String>,
    /// Active filters keyed by column label
    #[serde(default)]
    pub filters: BTreeMap<String, CustomFilter>,
}

impl Table {
    /// Create an empty table with placeholder headers `Column1..N`
    #[must_use]
    pub fn new(name: impl Into<String>, anchor: CellAddress, column_count: u16) -> Self {
        Self {
            name: name.into(),
            anchor,
            columns: (1..=column_count).map(|i| format!("Column{i}")).collect(),
            rows: Vec::new(),
            header_format: RangeFormat::default(),
            body_format: RangeFormat::default(),
            style: None,
            filters: BTreeMap::new(),
        }
    }

    /// Index of the column labelled `label`
    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, label: &str) -> Option<impl Iterator<Item = &CellValue>> {
        let index = self.column_index(label)?;
        Some(self.rows.iter().filter_map(move |row| row.get(index)))
    }

    /// Visibility of every data row under the active filters
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidFilter` when a stored filter names an
    /// unknown column or has a malformed criterion.
    pub fn row_visibility(&self) -> Result<Vec<bool>, DocumentError> {
        let compiled = self
            .filters
            .iter()
            .map(|(label, filter)| {
                let index = self.column_index(label).ok_or_else(|| {
                    HostError::not_found(format!("Column '{label}' in table '{}'", self.name))
                })?;
                Ok((index, CompiledFilter::compile(filter)?))
            })
            .collect::<Result<Vec<_>, HostError>>()?;

        Ok(self
            .rows
            .iter()
            .map(|row| {
                compiled.iter().all(|(index, filter)| {
                    filter.matches(row.get(*index).unwrap_or(&CellValue::Empty))
                })
            })
            .collect())
    }

    /// Rows passing every active filter
    ///
    /// # Errors
    ///
    /// Same as [`Table::row_visibility`].
    pub fn visible_rows(&self) -> Result<Vec<&[CellValue]>, DocumentError> {
        let visibility = self.row_visibility()?;
        Ok(self
            .rows
            .iter()
            .zip(visibility)
            .filter_map(|(row, visible)| visible.then_some(row.as_slice()))
            .collect())
    }
}

/// The host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Worksheet name
    pub sheet_name: String,
    /// Cells outside the table, keyed by position
    #[serde(default, with = "cell_map")]
    pub cells: BTreeMap<CellAddress, Cell>,
    /// The report table, if one exists
    #[serde(default)]
    pub table: Option<Table>,
}

impl Default for Workbook {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            cells: BTreeMap::new(),
            table: None,
        }
    }
}

impl Workbook {
    /// Load a document, or start empty when the file does not exist
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` on I/O failure or malformed JSON.
    pub fn load_or_default(path: &Path) -> Result<Self, DocumentError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load a document from `path`
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` on I/O failure or malformed JSON.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let data = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| DocumentError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the document to `path`
    ///
    /// The file is replaced through a sibling temporary file.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` on I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let io_err = |source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| DocumentError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)
    }

    /// Value of a free cell
    #[must_use]
    pub fn cell_value(&self, address: CellAddress) -> Option<&CellValue> {
        self.cells.get(&address).map(|cell| &cell.value)
    }

    /// Table by name
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` with a debug payload naming the lookup.
    pub fn table(&self, name: &str) -> Result<&Table, HostError> {
        self.table
            .as_ref()
            .filter(|t| t.name == name)
            .ok_or_else(|| missing_table(name))
    }

    /// Mutable table by name
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` with a debug payload naming the lookup.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, HostError> {
        self.table
            .as_mut()
            .filter(|t| t.name == name)
            .ok_or_else(|| missing_table(name))
    }
}

fn missing_table(name: &str) -> HostError {
    HostError::new(
        HostErrorCode::ItemNotFound,
        format!("The requested resource doesn't exist: table '{name}'"),
    )
    .with_debug_info(serde_json::json!({
        "code": "ItemNotFound",
        "errorLocation": "TableCollection.getItem",
        "statement": format!("var table = tables.getItem(\"{name}\");"),
    }))
}

/// Strip the leading apostrophe that forces a value to text
#[must_use]
pub fn store_value(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(text) => match text.strip_prefix(TEXT_PREFIX) {
            Some(rest) => CellValue::Text(rest.to_string()),
            None => CellValue::Text(text),
        },
        other => other,
    }
}

/// JSON object keys must be strings; cells are stored under `A1` names
mod cell_map {
    use std::collections::BTreeMap;

    use application::ports::CellAddress;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    use super::Cell;

    pub fn serialize<S: Serializer>(
        cells: &BTreeMap<CellAddress, Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        cells
            .iter()
            .map(|(address, cell)| (address.to_a1(), cell))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<CellAddress, Cell>, D::Error> {
        BTreeMap::<String, Cell>::deserialize(deserializer)?
            .into_iter()
            .map(|(reference, cell)| {
                CellAddress::parse(&reference)
                    .map(|address| (address, cell))
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}
