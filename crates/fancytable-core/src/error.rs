use thiserror::Error;

/// Errors surfaced by the editor core.
///
/// Edge cases of editing itself (bad numeric input, out-of-range indices)
/// are not errors; they degrade to defined fallbacks instead.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Import #{ticket} was superseded by import #{latest}")]
    StaleImport { ticket: u64, latest: u64 },
}

impl EditorError {
    /// Stable machine-readable code for the host UI
    pub fn code(&self) -> &'static str {
        match self {
            EditorError::InvalidConfig(_) => "INVALID_CONFIG",
            EditorError::UnknownTheme(_) => "UNKNOWN_THEME",
            EditorError::StaleImport { .. } => "STALE_IMPORT",
        }
    }
}
