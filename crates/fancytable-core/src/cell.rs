use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::{plain_number, CellFormat};

/// Semantic type of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Text,
    Number,
    Currency,
    Percentage,
    Date,
}

impl CellType {
    /// Number, currency and percentage cells carry numeric payloads
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellType::Number | CellType::Currency | CellType::Percentage
        )
    }
}

/// Payload of a numeric-family cell.
///
/// `Unparsed` holds input that was committed to a numeric cell but could not
/// be read as a number. The cell keeps its numeric type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Parsed(f64),
    Unparsed(String),
}

impl Numeric {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Numeric::Parsed(n) => Some(*n),
            Numeric::Unparsed(_) => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Numeric::Parsed(n) => plain_number(*n),
            Numeric::Unparsed(s) => s.clone(),
        }
    }
}

impl From<CellInput> for Numeric {
    fn from(input: CellInput) -> Self {
        match input {
            CellInput::Number(n) => Numeric::Parsed(n),
            CellInput::Text(s) => Numeric::Unparsed(s),
        }
    }
}

/// A committed value ready to be written into a cell of any type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellInput {
    Number(f64),
    Text(String),
}

impl CellInput {
    fn into_text(self) -> String {
        match self {
            CellInput::Number(n) => plain_number(n),
            CellInput::Text(s) => s,
        }
    }
}

impl From<f64> for CellInput {
    fn from(n: f64) -> Self {
        CellInput::Number(n)
    }
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

/// The typed value stored in a cell; the variant is the cell's type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Text(String),
    Number(Numeric),
    Currency(Numeric),
    Percentage(Numeric),
    Date(String),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl CellValue {
    /// Build a value of the given type from a committed input
    pub fn of_type(cell_type: CellType, input: CellInput) -> Self {
        match cell_type {
            CellType::Text => CellValue::Text(input.into_text()),
            CellType::Date => CellValue::Date(input.into_text()),
            CellType::Number => CellValue::Number(input.into()),
            CellType::Currency => CellValue::Currency(input.into()),
            CellType::Percentage => CellValue::Percentage(input.into()),
        }
    }

    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Text(_) => CellType::Text,
            CellValue::Number(_) => CellType::Number,
            CellValue::Currency(_) => CellType::Currency,
            CellValue::Percentage(_) => CellType::Percentage,
            CellValue::Date(_) => CellType::Date,
        }
    }

    /// Replace the payload, keeping the type
    pub fn replace(&mut self, input: CellInput) {
        *self = CellValue::of_type(self.cell_type(), input);
    }

    /// Numeric payload, if the cell holds a parsed number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) | CellValue::Currency(n) | CellValue::Percentage(n) => {
                n.as_number()
            }
            CellValue::Text(_) | CellValue::Date(_) => None,
        }
    }

    /// The raw value as a string (what an edit buffer starts from)
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Date(s) => s.clone(),
            CellValue::Number(n) | CellValue::Currency(n) | CellValue::Percentage(n) => {
                n.as_text()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(s) | CellValue::Date(s) => s.is_empty(),
            CellValue::Number(Numeric::Unparsed(s))
            | CellValue::Currency(Numeric::Unparsed(s))
            | CellValue::Percentage(Numeric::Unparsed(s)) => s.is_empty(),
            _ => false,
        }
    }
}

/// One addressable unit of table data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: Uuid,
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<CellFormat>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::new(CellValue::default())
    }
}

impl Cell {
    /// Create a new cell with a fresh id
    pub fn new(value: CellValue) -> Self {
        Cell {
            id: Uuid::new_v4(),
            value,
            format: None,
        }
    }

    /// An empty text cell, used for padding and new rows/columns
    pub fn empty() -> Self {
        Cell::default()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::new(CellValue::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Cell::new(CellValue::Number(Numeric::Parsed(value)))
    }

    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_is_numeric() {
        assert!(CellType::Number.is_numeric());
        assert!(CellType::Currency.is_numeric());
        assert!(CellType::Percentage.is_numeric());
        assert!(!CellType::Text.is_numeric());
        assert!(!CellType::Date.is_numeric());
    }

    #[test]
    fn test_empty_cell_is_text() {
        let cell = Cell::empty();
        assert_eq!(cell.cell_type(), CellType::Text);
        assert!(cell.value.is_empty());
        assert!(cell.format.is_none());
    }

    #[test]
    fn test_cells_get_distinct_ids() {
        assert_ne!(Cell::empty().id, Cell::empty().id);
    }

    #[test]
    fn test_replace_keeps_type() {
        let mut value = CellValue::Currency(Numeric::Parsed(10.0));
        value.replace(CellInput::from("abc"));
        assert_eq!(value, CellValue::Currency(Numeric::Unparsed("abc".into())));

        value.replace(CellInput::from(12.5));
        assert_eq!(value, CellValue::Currency(Numeric::Parsed(12.5)));
    }

    #[test]
    fn test_replace_text_with_number_stringifies() {
        let mut value = CellValue::Text("old".into());
        value.replace(CellInput::Number(3.0));
        assert_eq!(value, CellValue::Text("3".into()));
    }

    #[test]
    fn test_as_text() {
        assert_eq!(CellValue::Percentage(Numeric::Parsed(0.45)).as_text(), "0.45");
        assert_eq!(CellValue::Number(Numeric::Parsed(42.0)).as_text(), "42");
        assert_eq!(CellValue::Number(Numeric::Unparsed("n/a".into())).as_text(), "n/a");
        assert_eq!(CellValue::Date("2024-01-01".into()).as_text(), "2024-01-01");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Currency(Numeric::Parsed(1.5)).as_number(), Some(1.5));
        assert_eq!(CellValue::Number(Numeric::Unparsed("x".into())).as_number(), None);
        assert_eq!(CellValue::Text("5".into()).as_number(), None);
    }

    #[test]
    fn test_serialization() {
        let cell = Cell::number(42.0);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["value"]["type"], "number");
        assert_eq!(json["value"]["value"], 42.0);

        let back: Cell = serde_json::from_value(json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn test_unparsed_serialization() {
        let value = CellValue::Number(Numeric::Unparsed("12abc".into()));
        let json = serde_json::to_string(&value).unwrap();
        let back: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
