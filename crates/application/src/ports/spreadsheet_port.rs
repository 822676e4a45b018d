//! Spreadsheet host port
//!
//! The host automation surface: the spreadsheet application that owns the
//! worksheet and its tables. Mutations are queued into a [`HostBatch`] and
//! handed to the host in one [`SpreadsheetHost::sync`] call.
//!
//! # Batch contract
//!
//! A host attempts every queued operation in order and reports the first
//! failure. Whether operations before the failure stay applied is
//! host-specific: [`SpreadsheetHost::is_atomic`] tells callers which
//! behaviour to expect. Application code never relies on rollback.

use std::fmt;

use async_trait::async_trait;
use domain::CellValue;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure category reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostErrorCode {
    /// Named table or column does not exist
    ItemNotFound,
    /// Argument rejected (bad address, malformed criterion, ...)
    InvalidArgument,
    /// Operation not allowed in the current document state
    InvalidOperation,
    /// Anything else
    GeneralException,
}

impl fmt::Display for HostErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ItemNotFound => "ItemNotFound",
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidOperation => "InvalidOperation",
            Self::GeneralException => "GeneralException",
        };
        write!(f, "{name}")
    }
}

/// Batch-level error raised by the host
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{code}: {message}")]
pub struct HostError {
    /// Failure category
    pub code: HostErrorCode,
    /// Human-readable message
    pub message: String,
    /// Secondary diagnostic payload, logged alongside the error
    pub debug_info: Option<serde_json::Value>,
}

impl HostError {
    /// Create an error without debug payload
    pub fn new(code: HostErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            debug_info: None,
        }
    }

    /// Attach a debug payload
    #[must_use]
    pub fn with_debug_info(mut self, debug_info: serde_json::Value) -> Self {
        self.debug_info = Some(debug_info);
        self
    }

    /// Shorthand for a missing table or column
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(HostErrorCode::ItemNotFound, what)
    }
}

/// Zero-based cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    /// Row index
    pub row: u32,
    /// Column index
    pub col: u16,
}

impl CellAddress {
    /// Create an address from indexes
    #[must_use]
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an `A1`-style reference
    ///
    /// # Errors
    ///
    /// Returns `HostErrorCode::InvalidArgument` for malformed references.
    pub fn parse(reference: &str) -> Result<Self, HostError> {
        let invalid = || {
            HostError::new(
                HostErrorCode::InvalidArgument,
                format!("Invalid cell reference: {reference}"),
            )
        };

        let reference = reference.trim();
        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = reference.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            let digit = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
            col = col
                .checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(invalid)?;
        }
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self {
            row: row - 1,
            col: u16::try_from(col - 1).map_err(|_| invalid())?,
        })
    }

    /// Render as an `A1`-style reference
    #[must_use]
    pub fn to_a1(&self) -> String {
        let mut letters = Vec::new();
        let mut n = u32::from(self.col) + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
            n = (n - 1) / 26;
        }
        letters.reverse();
        format!("{}{}", letters.into_iter().collect::<String>(), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Range targeted by a formatting operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeRef {
    /// A single cell
    Cell(CellAddress),
    /// Header row of a named table
    TableHeader(String),
    /// Data rows of a named table
    TableBody(String),
}

/// Formatting applied to a range; `None` leaves a property untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFormat {
    /// Fill colour as `rrggbb`
    pub fill_color: Option<String>,
    /// Bold font
    pub bold: Option<bool>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Font colour as `rrggbb` or a colour name
    pub font_color: Option<String>,
    /// Fit column widths to content
    #[serde(default)]
    pub autofit_columns: bool,
}

impl RangeFormat {
    /// Empty format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill colour
    #[must_use]
    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    /// Set font weight
    #[must_use]
    pub const fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set font size
    #[must_use]
    pub const fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set font colour
    #[must_use]
    pub fn font_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = Some(color.into());
        self
    }

    /// Autofit column widths
    #[must_use]
    pub const fn autofit(mut self) -> Self {
        self.autofit_columns = true;
        self
    }

    /// Overlay another format's set properties onto this one
    pub fn merge(&mut self, other: &Self) {
        if other.fill_color.is_some() {
            self.fill_color.clone_from(&other.fill_color);
        }
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_color.is_some() {
            self.font_color.clone_from(&other.font_color);
        }
        self.autofit_columns |= other.autofit_columns;
    }
}

/// How the two criteria of a custom filter combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    And,
    Or,
}

/// Custom column filter in spreadsheet criterion syntax
///
/// Criteria look like `=*Rain*`, `<=80` or `>=20`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFilter {
    /// First criterion
    pub criterion1: String,
    /// Optional second criterion
    pub criterion2: Option<String>,
    /// Combinator for the two criteria
    pub operator: FilterOperator,
}

impl CustomFilter {
    /// Filter with a single criterion
    pub fn single(criterion: impl Into<String>) -> Self {
        Self {
            criterion1: criterion.into(),
            criterion2: None,
            operator: FilterOperator::And,
        }
    }

    /// Filter combining two criteria
    pub fn combined(
        criterion1: impl Into<String>,
        criterion2: impl Into<String>,
        operator: FilterOperator,
    ) -> Self {
        Self {
            criterion1: criterion1.into(),
            criterion2: Some(criterion2.into()),
            operator,
        }
    }
}

/// One queued host mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostOperation {
    /// Clear content and formatting of the whole active worksheet
    ClearSheet,
    /// Create a table whose header row starts at `anchor`
    AddTable {
        name: String,
        anchor: CellAddress,
        column_count: u16,
    },
    /// Overwrite a table's header labels
    SetHeaderValues { table: String, values: Vec<String> },
    /// Append data rows to a table
    AppendRows {
        table: String,
        rows: Vec<Vec<CellValue>>,
    },
    /// Write a single cell
    SetCellValue { cell: CellAddress, value: CellValue },
    /// Apply formatting to a range
    FormatRange { range: RangeRef, format: RangeFormat },
    /// Set a named visual table style
    SetTableStyle { table: String, style: String },
    /// Apply a custom filter to one table column, replacing any previous one
    ApplyColumnFilter {
        table: String,
        column: String,
        filter: CustomFilter,
    },
    /// Remove the filter from one table column
    ClearColumnFilter { table: String, column: String },
    /// Remove every filter from a table
    ClearTableFilters { table: String },
}

/// Operations queued for a single synchronization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostBatch {
    operations: Vec<HostOperation>,
}

impl HostBatch {
    /// Empty batch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an operation
    pub fn push(&mut self, operation: HostOperation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Queued operations in order
    #[must_use]
    pub fn operations(&self) -> &[HostOperation] {
        &self.operations
    }

    /// Consume the batch
    #[must_use]
    pub fn into_operations(self) -> Vec<HostOperation> {
        self.operations
    }

    /// Number of queued operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check whether nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Port for the spreadsheet host automation surface
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpreadsheetHost: Send + Sync {
    /// Apply every queued operation and report the first failure
    async fn sync(&self, batch: HostBatch) -> Result<(), HostError>;

    /// Whether a failed batch leaves the document untouched
    fn is_atomic(&self) -> bool;
}
