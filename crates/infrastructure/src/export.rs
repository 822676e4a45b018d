//! Excel export
//!
//! Renders the host document as an `.xlsx` file: title cells, the report
//! table with its header and body formats and named style, and rows hidden
//! by the active column filters.

use std::path::Path;

use application::ports::RangeFormat;
use domain::CellValue;
use rust_xlsxwriter::{
    Color, Format, Table, TableColumn, TableStyle, Workbook as XlsxWorkbook, Worksheet,
};
use tracing::{debug, instrument};

use crate::workbook::{DocumentError, Workbook};

/// Map a host format onto an xlsx cell format
#[must_use]
pub fn to_xlsx_format(format: &RangeFormat) -> Format {
    let mut xlsx = Format::new();
    if let Some(color) = format.fill_color.as_deref().and_then(parse_color) {
        xlsx = xlsx.set_background_color(color);
    }
    if format.bold == Some(true) {
        xlsx = xlsx.set_bold();
    }
    if let Some(size) = format.font_size {
        xlsx = xlsx.set_font_size(size);
    }
    if let Some(color) = format.font_color.as_deref().and_then(parse_color) {
        xlsx = xlsx.set_font_color(color);
    }
    xlsx
}

/// Parse `rrggbb`, `#rrggbb` or a basic colour name
#[must_use]
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "black" => return Some(Color::Black),
        "white" => return Some(Color::White),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "blue" => return Some(Color::Blue),
        _ => {},
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Color::RGB)
}

/// Map a host table style name such as `TableStyleMedium25`
#[must_use]
pub fn table_style(name: &str) -> TableStyle {
    let Some(rest) = name.strip_prefix("TableStyle") else {
        return TableStyle::Medium9;
    };
    let digits = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let number: u8 = digits.parse().unwrap_or(0);
    match &rest[..rest.len() - digits.len()] {
        "Light" => light_style(number),
        "Medium" => medium_style(number),
        "Dark" => TableStyle::Dark1,
        _ => TableStyle::Medium9,
    }
}

fn light_style(n: u8) -> TableStyle {
    match n {
        8 => TableStyle::Light8,
        9 => TableStyle::Light9,
        15 => TableStyle::Light15,
        _ => TableStyle::Light1,
    }
}

fn medium_style(n: u8) -> TableStyle {
    match n {
        2 => TableStyle::Medium2,
        16 => TableStyle::Medium16,
        21 => TableStyle::Medium21,
        25 => TableStyle::Medium25,
        28 => TableStyle::Medium28,
        _ => TableStyle::Medium9,
    }
}

fn write_value(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> Result<(), DocumentError> {
    match value {
        CellValue::Text(text) => sheet.write_string_with_format(row, col, text, format)?,
        CellValue::Number(number) => sheet.write_number_with_format(row, col, *number, format)?,
        CellValue::Empty => sheet.write_blank(row, col, format)?,
    };
    Ok(())
}

/// Write `workbook` to an `.xlsx` file at `path`
///
/// # Errors
///
/// Returns `DocumentError` if a stored filter cannot be evaluated or the
/// file cannot be written.
#[instrument(skip(workbook), fields(path = %path.display()))]
pub fn export_xlsx(workbook: &Workbook, path: &Path) -> Result<(), DocumentError> {
    let mut xlsx = XlsxWorkbook::new();
    let sheet = xlsx.add_worksheet();
    sheet.set_name(&workbook.sheet_name)?;

    let mut autofit = false;
    for (address, cell) in &workbook.cells {
        write_value(sheet, address.row, address.col, &cell.value, &to_xlsx_format(&cell.format))?;
        autofit |= cell.format.autofit_columns;
    }

    if let Some(table) = &workbook.table {
        let header_format = to_xlsx_format(&table.header_format);
        let body_format = to_xlsx_format(&table.body_format);
        autofit |= table.header_format.autofit_columns || table.body_format.autofit_columns;

        let columns: Vec<TableColumn> = table
            .columns
            .iter()
            .map(|label| {
                TableColumn::new()
                    .set_header(label)
                    .set_header_format(header_format.clone())
            })
            .collect();

        let mut xlsx_table = Table::new().set_columns(&columns);
        if let Some(style) = &table.style {
            xlsx_table = xlsx_table.set_style(table_style(style));
        }

        let first_row = table.anchor.row;
        let first_col = table.anchor.col;
        let width = u16::try_from(table.columns.len()).unwrap_or(u16::MAX);
        let last_col = first_col + width.saturating_sub(1);
        let body_rows = u32::try_from(table.rows.len().max(1)).unwrap_or(u32::MAX);
        let last_row = first_row + body_rows;

        let visibility = table.row_visibility()?;
        for (offset, (row, visible)) in table.rows.iter().zip(visibility).enumerate() {
            let row_index = first_row + 1 + u32::try_from(offset).unwrap_or(u32::MAX);
            for (col_offset, value) in row.iter().enumerate() {
                let col_index = first_col + u16::try_from(col_offset).unwrap_or(u16::MAX);
                write_value(sheet, row_index, col_index, value, &body_format)?;
            }
            if !visible {
                sheet.set_row_hidden(row_index)?;
            }
        }

        sheet.add_table(first_row, first_col, last_row, last_col, &xlsx_table)?;
        debug!(rows = table.rows.len(), filters = table.filters.len(), "Table exported");
    }

    if autofit {
        sheet.autofit();
    }

    xlsx.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::ports::{CellAddress, CustomFilter};
    use crate::workbook::{Cell, Table as ReportTable};

    #[test]
    fn colors() {
        assert!(matches!(parse_color("9fcdb3"), Some(Color::RGB(0x9f_cd_b3))));
        assert!(matches!(parse_color("#004b1c"), Some(Color::RGB(0x00_4b_1c))));
        assert!(matches!(parse_color("Black"), Some(Color::Black)));
        assert!(parse_color("bogus").is_none());
        assert!(parse_color("12345").is_none());
    }

    #[test]
    fn style_names() {
        assert!(matches!(table_style("TableStyleMedium25"), TableStyle::Medium25));
        assert!(matches!(table_style("TableStyleLight9"), TableStyle::Light9));
        assert!(matches!(table_style("TableStyleDark3"), TableStyle::Dark1));
        assert!(matches!(table_style("Fancy"), TableStyle::Medium9));
    }

    fn report() -> Workbook {
        let mut table = ReportTable::new("ForecastReport", CellAddress::new(3, 0), 2);
        table.columns = vec!["Conditions".into(), "Cloud Cover (%)".into()];
        table.rows = vec![
            vec![CellValue::from("Rain"), CellValue::Number(90.0)],
            vec![CellValue::from("Clear"), CellValue::Number(10.0)],
        ];
        table.header_format = RangeFormat::new().fill("9fcdb3").bold(true).autofit();
        table.style = Some("TableStyleMedium25".into());
        table
            .filters
            .insert("Conditions".into(), CustomFilter::single("=*Rain*"));

        let mut workbook = Workbook::default();
        workbook.cells.insert(
            CellAddress::new(0, 0),
            Cell {
                value: CellValue::from("Mannheim"),
                format: RangeFormat::new().bold(true).font_size(16.0),
            },
        );
        workbook.table = Some(table);
        workbook
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        export_xlsx(&report(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn export_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let mut workbook = report();
        if let Some(table) = workbook.table.as_mut() {
            table.rows.clear();
        }
        export_xlsx(&workbook, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn export_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.xlsx");
        export_xlsx(&Workbook::default(), &path).unwrap();
        assert!(path.exists());
    }
}
