//! Delimited text import and export using the csv crate.
//!
//! RFC 4180 quoting, no header promotion: the first line is data row 0.

use fancytable_core::{export_text, Table};
use std::io::Cursor;
use tracing::{debug, info};

use crate::error::{ExportError, ImportError};

/// Field separators recognized on import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }
}

/// Pick the delimiter that occurs most often in the first few lines.
/// Ties prefer tab (spreadsheet clipboard data), then pipe, then semicolon.
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Parse delimited text with an explicit delimiter. Empty lines are skipped
/// and rows may have different lengths.
pub fn parse_with(content: &str, delimiter: Delimiter) -> Result<Vec<Vec<String>>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(rows = rows.len(), delimiter = ?delimiter, "parsed delimited text");
    Ok(rows)
}

/// Parse delimited text, detecting the delimiter
pub fn parse_delimited(content: &str) -> Result<Vec<Vec<String>>, ImportError> {
    parse_with(content, detect_delimiter(content))
}

/// Serialize a table as comma-separated text with CRLF line endings.
///
/// Parsed currency and percentage values are re-rendered (`$1234.50`,
/// `45.00%`); everything else is written as stored.
pub fn table_to_csv(table: &Table) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(Vec::new());

    for row in table.rows() {
        writer.write_record(row.cells.iter().map(export_text))?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8(bytes)?;
    // No terminator after the last record
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }

    info!(name = %table.name, rows = table.row_count(), "exported table as delimited text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let rows = parse_delimited("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = r#""hello, world","$1,234.50"
"with ""quotes""",normal
"#;
        let rows = parse_delimited(content).unwrap();
        assert_eq!(rows[0], vec!["hello, world", "$1,234.50"]);
        assert_eq!(rows[1][0], "with \"quotes\"");
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let rows = parse_delimited("a,b\n\n\nc,d\n\n").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_keeps_ragged_rows() {
        let rows = parse_delimited("a,b,c\n1\n2,3\n").unwrap();
        let lengths: Vec<usize> = rows.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_pasted_tab_data() {
        let rows = parse_delimited("Item\tPrice\nWidget\t$1,234.50\n").unwrap();
        assert_eq!(rows[1], vec!["Widget", "$1,234.50"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_delimited("").unwrap().is_empty());
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), Delimiter::Comma);
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), Delimiter::Tab);
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), Delimiter::Pipe);
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), Delimiter::Semicolon);
        assert_eq!(detect_delimiter("single"), Delimiter::Comma);
    }

    #[test]
    fn test_parse_with_explicit_delimiter() {
        let rows = parse_with("a;b,c", Delimiter::Semicolon).unwrap();
        assert_eq!(rows, vec![vec!["a", "b,c"]]);
    }

    #[test]
    fn test_table_to_csv_formats_numeric_types() {
        let rows = vec![
            vec!["Item".to_string(), "Price".to_string(), "Share".to_string()],
            vec!["Widget".to_string(), "$1,234.50".to_string(), "45%".to_string()],
        ];
        let table = Table::from_rows(&rows, "T");
        let csv = table_to_csv(&table).unwrap();
        assert_eq!(csv, "Item,Price,Share\r\nWidget,$1234.50,45.00%");
    }

    #[test]
    fn test_table_to_csv_quotes_when_needed() {
        let rows = vec![vec!["a, b".to_string(), "say \"hi\"".to_string()]];
        let table = Table::from_rows(&rows, "T");
        assert_eq!(table_to_csv(&table).unwrap(), "\"a, b\",\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_table_to_csv_empty_table() {
        let rows = vec![vec!["x".to_string()]];
        let mut table = Table::from_rows(&rows, "T");
        table.remove_row(0);
        assert_eq!(table_to_csv(&table).unwrap(), "");
    }
}
