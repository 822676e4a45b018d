//! Report layout and styling
//!
//! Immutable configuration handed to the report builder and filter
//! controller. Nothing here is shared mutable state; callers clone or
//! borrow it explicitly.

use serde::{Deserialize, Serialize};

use crate::ports::{CellAddress, RangeFormat};

/// Where the report lives in the worksheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    /// Name of the report table
    pub table_name: String,
    /// Top-left cell of the table header row
    pub table_anchor: CellAddress,
    /// Cell receiving the location title
    pub title_cell: CellAddress,
    /// Cell receiving the date-range subtitle
    pub subtitle_cell: CellAddress,
}

impl ReportLayout {
    /// Table name every filter operation targets
    pub const TABLE_NAME: &'static str = "ForecastReport";

    /// Zero-based row index of the header row; rows above hold the titles
    pub const HEADER_ROW: u32 = 3;
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            table_name: Self::TABLE_NAME.to_string(),
            table_anchor: CellAddress::new(Self::HEADER_ROW, 0),
            title_cell: CellAddress::new(0, 0),
            subtitle_cell: CellAddress::new(1, 0),
        }
    }
}

/// Visual styling of the generated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStyle {
    /// Header row format
    pub header: RangeFormat,
    /// Data rows format
    pub body: RangeFormat,
    /// Title cell format
    pub title: RangeFormat,
    /// Subtitle cell format
    pub subtitle: RangeFormat,
    /// Named table style
    pub table_style: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            header: RangeFormat::new()
                .autofit()
                .fill("9fcdb3")
                .bold(true)
                .font_size(11.0)
                .font_color("004b1c"),
            body: RangeFormat::new()
                .fill("e9f5ee")
                .bold(false)
                .autofit()
                .font_size(10.0),
            title: RangeFormat::new()
                .bold(true)
                .font_size(16.0)
                .font_color("0e5c2f"),
            subtitle: RangeFormat::new()
                .bold(true)
                .font_size(14.0)
                .font_color("0e5c2f"),
            table_style: "TableStyleMedium25".to_string(),
        }
    }
}
