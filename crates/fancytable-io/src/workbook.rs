//! Binary workbook import (calamine) and export (rust_xlsxwriter).

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::Timelike;
use fancytable_core::format::plain_number;
use fancytable_core::{CellValue, Numeric, Table};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use tracing::{debug, info};

use crate::error::{ExportError, ImportError};

const MAX_SHEET_NAME_LEN: usize = 31;
const FALLBACK_SHEET_NAME: &str = "Sheet1";

/// Read the first worksheet of an .xlsx or .xls file as rows of strings.
///
/// The header row, if any, is returned as ordinary row 0.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)??;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(data_to_string).collect())
        .collect();

    debug!(rows = rows.len(), "read first worksheet");
    Ok(rows)
}

/// Stringify a workbook value the way type inference expects to see it
fn data_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Float(f) => plain_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.hour() == 0 && value.minute() == 0 && value.second() == 0 => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => plain_number(dt.as_f64()),
        },
        other => other.to_string(),
    }
}

/// Make a table name acceptable as a worksheet name: at most 31 characters,
/// none of `[]:*?/\`, no leading or trailing apostrophe, never empty.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let cleaned: String = cleaned
        .trim()
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if cleaned.trim().is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        cleaned
    }
}

/// Write the table as a single-sheet .xlsx file.
///
/// Parsed numeric values become numeric workbook cells; text, dates and
/// unparsed input become text cells. Empty cells are left blank.
pub fn table_to_xlsx(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let sheet_name = sanitize_sheet_name(&table.name);
    worksheet.set_name(sheet_name.as_str())?;

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(row_idx).unwrap_or(u32::MAX);
        for (col_idx, cell) in row.cells.iter().enumerate() {
            let col_num = u16::try_from(col_idx).unwrap_or(u16::MAX);
            match &cell.value {
                CellValue::Number(Numeric::Parsed(n))
                | CellValue::Currency(Numeric::Parsed(n))
                | CellValue::Percentage(Numeric::Parsed(n)) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                other => {
                    let text = other.as_text();
                    if !text.is_empty() {
                        worksheet.write_string(row_num, col_num, text.as_str())?;
                    }
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    info!(name = %table.name, rows = table.row_count(), bytes = bytes.len(), "exported table as workbook");
    Ok(bytes)
}
