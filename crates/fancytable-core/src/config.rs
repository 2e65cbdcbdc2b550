use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::format::DEFAULT_CURRENCY;
use crate::theme::{theme_by_id, Theme};

/// Editor configuration, loaded from JSON supplied by the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Rows in a blank table
    pub blank_rows: usize,
    /// Columns in a blank table
    pub blank_columns: usize,
    pub blank_table_name: String,
    pub import_table_name: String,
    pub paste_table_name: String,
    /// Currency recorded on imported currency cells
    pub default_currency: String,
    /// Theme applied to new tables; the first preset when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme_id: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            blank_rows: 10,
            blank_columns: 8,
            blank_table_name: "New Table".to_string(),
            import_table_name: "Imported Table".to_string(),
            paste_table_name: "Pasted Data".to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            default_theme_id: None,
        }
    }
}

impl EditorConfig {
    /// Parse configuration from JSON; blank input yields the defaults
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: EditorConfig = serde_json::from_str(json)?;
        // A blank table always has at least one column
        config.blank_columns = config.blank_columns.max(1);
        Ok(config)
    }

    /// Theme applied to freshly created tables
    pub fn default_theme(&self) -> Theme {
        match &self.default_theme_id {
            Some(id) => theme_by_id(id),
            None => Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.blank_rows, 10);
        assert_eq!(config.blank_columns, 8);
        assert_eq!(config.blank_table_name, "New Table");
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.default_theme(), Theme::default());
    }

    #[test]
    fn test_from_empty_json() {
        assert_eq!(EditorConfig::from_json("").unwrap(), EditorConfig::default());
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_from_partial_json() {
        let config =
            EditorConfig::from_json(r#"{"blankRows": 3, "defaultThemeId": "nord"}"#).unwrap();
        assert_eq!(config.blank_rows, 3);
        assert_eq!(config.blank_columns, 8);
        assert_eq!(config.default_theme().id, "nord");
    }

    #[test]
    fn test_zero_columns_floored() {
        let config = EditorConfig::from_json(r#"{"blankColumns": 0}"#).unwrap();
        assert_eq!(config.blank_columns, 1);
    }

    #[test]
    fn test_invalid_json() {
        let err = EditorConfig::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
    }
}
