use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors raised while turning a file or pasted text into rows.
///
/// Any of these aborts the import; the current table is left as it was.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file type: {0} (expected .csv, .xlsx or .xls)")]
    UnsupportedFileType(String),

    #[error("Could not parse delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            ImportError::Csv(_) => "CSV_PARSE_ERROR",
            ImportError::Workbook(_) => "WORKBOOK_READ_ERROR",
            ImportError::NoWorksheet => "NO_WORKSHEET",
        }
    }
}

/// Errors raised while serializing a table
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not write delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Exported text is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("Could not write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Csv(_) => "CSV_WRITE_ERROR",
            ExportError::Encoding(_) => "ENCODING_ERROR",
            ExportError::Workbook(_) => "WORKBOOK_WRITE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_codes() {
        let err = ImportError::UnsupportedFileType("notes.txt".into());
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
        assert!(err.to_string().contains("notes.txt"));
        assert_eq!(ImportError::NoWorksheet.code(), "NO_WORKSHEET");
    }

    #[test]
    fn test_export_error_from_utf8() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: ExportError = utf8_err.into();
        assert_eq!(err.code(), "ENCODING_ERROR");
    }
}
