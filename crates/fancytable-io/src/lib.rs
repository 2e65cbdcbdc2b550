pub mod delimited;
pub mod error;
pub mod source;
pub mod workbook;

pub use delimited::{detect_delimiter, parse_delimited, parse_with, table_to_csv, Delimiter};
pub use error::{ExportError, ImportError};
pub use source::FileKind;
pub use workbook::{read_workbook, sanitize_sheet_name, table_to_xlsx};

use fancytable_core::{EditorConfig, Table};
use tracing::{info, warn};

/// Read an uploaded file into raw rows, dispatching on its extension
pub fn read_file(file_name: &str, bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
    let kind = FileKind::from_file_name(file_name).inspect_err(|_| {
        warn!(file = file_name, "rejected unsupported file type");
    })?;

    if kind.is_workbook() {
        read_workbook(bytes)
    } else {
        parse_delimited(&String::from_utf8_lossy(bytes))
    }
}

/// Build a table from an uploaded file, named after the file
pub fn import_file(config: &EditorConfig, file_name: &str, bytes: &[u8]) -> Result<Table, ImportError> {
    let rows = read_file(file_name, bytes)?;
    let name = if file_name.is_empty() {
        config.import_table_name.as_str()
    } else {
        file_name
    };
    let table = Table::from_rows_with(config, &rows, name);
    info!(
        file = file_name,
        rows = table.row_count(),
        columns = table.column_count(),
        "imported file"
    );
    Ok(table)
}

/// Build a table from pasted text (tab-separated when copied from a
/// spreadsheet)
pub fn import_text(config: &EditorConfig, text: &str) -> Result<Table, ImportError> {
    let rows = parse_delimited(text)?;
    let table = Table::from_rows_with(config, &rows, config.paste_table_name.as_str());
    info!(rows = table.row_count(), columns = table.column_count(), "imported pasted text");
    Ok(table)
}
