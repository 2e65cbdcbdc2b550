use crate::error::ImportError;

/// Kind of an uploaded file, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
    Xls,
}

impl FileKind {
    /// Classify a file name; anything other than .csv, .xlsx or .xls is rejected
    pub fn from_file_name(name: &str) -> Result<Self, ImportError> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xlsx" => Ok(FileKind::Xlsx),
            "xls" => Ok(FileKind::Xls),
            _ => Err(ImportError::UnsupportedFileType(name.to_string())),
        }
    }

    pub fn is_workbook(&self) -> bool {
        matches!(self, FileKind::Xlsx | FileKind::Xls)
    }
}
